mod client;

pub use client::{Client, ClientInput, FieldError, NewClient};
