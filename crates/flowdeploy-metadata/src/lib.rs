mod config;
pub use config::MetadataConfig;

mod xml;

mod envelope;

mod parse;

mod client;
pub use client::SoapMetadataClient;
