// [libs/domain/delivery/src/errors.rs]
/*!
 * APARATO: DELIVERY ERROR CATALOG
 * RESPONSABILIDAD: FALLOS DE LA PROYECCIÓN TABULAR, NUNCA DE ENVÍO
 */

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("[L2_DELIVERY_CSV_FAULT]: ROW_SERIALIZATION_REJECTED -> {0}")]
    CsvWriteFault(#[from] csv::Error),

    #[error("[L2_DELIVERY_ENCODE_FAULT]: UTF8_BUFFER_CORRUPT -> {0}")]
    EncodingFault(#[from] std::string::FromUtf8Error),
}
