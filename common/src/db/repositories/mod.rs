// Repository layer

pub mod article;
