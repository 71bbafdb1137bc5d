//! WhatsApp order ingestion

mod ingest;

pub use ingest::WhatsAppIngest;
