use thiserror::Error;

/// Everything that can go wrong while decoding a raw DNS payload.
///
/// The variants are deliberately fine-grained: the orchestrator inspects the
/// kind to decide whether a failure under the TC flag is a tail truncation
/// (downgraded to `malformed_packet`) or a hard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("dns payload too short to decode header")]
    HeaderTooShort,

    #[error("dns payload too short to get label")]
    LabelTooShort,

    #[error("label too long")]
    LabelTooLong,

    #[error("invalid label length byte")]
    LabelInvalidData,

    #[error("invalid offset to decode label")]
    LabelInvalidOffset,

    #[error("label pointer not pointing to prior data")]
    LabelInvalidPointer,

    #[error("not enough data to decode qtype")]
    QuestionQtypeTooShort,

    #[error("not enough data to decode answer")]
    AnswerTooShort,

    #[error("not enough data to decode answer rdata")]
    AnswerRdataTooShort,

    #[error("not enough data to decode edns")]
    EdnsDataTooShort,

    #[error("not enough data to decode edns option")]
    EdnsOptionTooShort,
}

/// Decode failure wrapped with the message section it happened in.
///
/// The original cause stays inspectable so callers can keep matching on the
/// [`DecodeError`] kind after the fact.
#[derive(Debug, Clone, Error)]
#[error("malformed {section} in DNS packet: {source}")]
pub struct PayloadDecodeError {
    pub section: &'static str,
    #[source]
    pub source: DecodeError,
}
