#![allow(dead_code, reason = "each test binary uses a different subset of helpers")]

use chrono::NaiveDate;
use crpt_api_client::documents::{Description, Document, Product};

pub const CREATE_PATH: &str = "/api/v3/lk/documents/create";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn product() -> Product {
    Product::builder()
        .certificate_document("CONFORMITY_DECLARATION")
        .certificate_document_date(date(2024, 4, 2))
        .certificate_document_number("EAEU-N-RU-42")
        .owner_inn("7701234567")
        .producer_inn("7709876543")
        .production_date(date(2024, 4, 30))
        .tnved_code("6404190000")
        .uit_code("0104630034070012215Qbag!")
        .uitu_code("046300340700122100")
        .build()
}

pub fn document(doc_id: &str) -> Document {
    Document::builder()
        .description(Description::new("7701234567"))
        .doc_id(doc_id)
        .doc_status("NEW")
        .owner_inn("7701234567")
        .production_date(date(2024, 5, 1))
        .production_type("OWN_PRODUCTION")
        .products(vec![product()])
        .reg_date(date(2024, 5, 2))
        .reg_number("REG-1")
        .build()
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
