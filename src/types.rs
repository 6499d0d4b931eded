/// Decoded response of a successful attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResponseEnvelope<T> {
    /// Parsed JSON body.
    pub data: T,
    /// HTTP status code.
    pub status: u16,
    /// Whether `status` is in the 2xx range.
    pub ok: bool,
}
