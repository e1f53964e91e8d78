use super::error::RemoteError;

/// Successful outcome of a request, tagged by whether a body was returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// 204, or a 2xx with an empty body. No parse was attempted.
    NoContent,
    /// A decoded body.
    Content(T),
}

impl<T> Reply<T> {
    pub fn is_no_content(&self) -> bool {
        matches!(self, Reply::NoContent)
    }

    /// The body, if any.
    pub fn content(self) -> Option<T> {
        match self {
            Reply::NoContent => None,
            Reply::Content(value) => Some(value),
        }
    }

    /// The body, or a decode error when the server sent none.
    pub fn require(self, status_hint: u16) -> Result<T, RemoteError> {
        match self {
            Reply::Content(value) => Ok(value),
            Reply::NoContent => Err(RemoteError::decode(
                status_hint,
                "expected a response body but the server sent none",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ErrorKind;

    #[test]
    fn test_require_on_no_content_is_decode_error() {
        let reply: Reply<u32> = Reply::NoContent;
        let err = reply.require(204).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
        assert_eq!(err.status_code, 204);
    }

    #[test]
    fn test_content_passthrough() {
        assert_eq!(Reply::Content(7).require(200).unwrap(), 7);
        assert_eq!(Reply::Content(7).content(), Some(7));
        assert!(Reply::<u32>::NoContent.is_no_content());
    }
}
