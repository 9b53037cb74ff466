fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use ftcp_protocol::{Ack, NegotiationReply, TransferRequest};

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture capture as the raw wire text.
    fn load_fixture(name: &str) -> String {
        let path = fixtures_dir().join(name);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
    }

    #[test]
    fn request_generations_parse_identically() {
        let current = TransferRequest::parse(&load_fixture("request_current.txt")).unwrap();
        let legacy = TransferRequest::parse(&load_fixture("request_legacy.txt")).unwrap();
        assert_eq!(current, legacy);
        assert_eq!(current.filename, "a.txt");
        assert!(current.is_supported_transport());
    }

    #[test]
    fn emitted_request_reparses() {
        let legacy = TransferRequest::parse(&load_fixture("request_legacy.txt")).unwrap();
        let reparsed = TransferRequest::parse(&legacy.encode()).unwrap();
        assert_eq!(reparsed, legacy);
    }

    #[test]
    fn grant_generations_agree_on_port() {
        let structured =
            NegotiationReply::parse(&load_fixture("reply_grant_structured.txt")).unwrap();
        let bare = NegotiationReply::parse(&load_fixture("reply_grant_bare.txt")).unwrap();

        let (NegotiationReply::Grant(structured), NegotiationReply::Grant(bare)) =
            (structured, bare)
        else {
            panic!("expected grants");
        };
        assert_eq!(structured.port, bare.port);
        // Only the structured generation echoes the filename.
        assert_eq!(structured.filename.as_deref(), Some("a.txt"));
        assert_eq!(bare.filename, None);
    }

    #[test]
    fn error_generations_both_recognized() {
        let current = NegotiationReply::parse(&load_fixture("reply_error_current.txt")).unwrap();
        let legacy = NegotiationReply::parse(&load_fixture("reply_error_legacy.txt")).unwrap();
        assert!(matches!(current, NegotiationReply::Error(_)));
        // The legacy peer's colon-separated reason is surfaced verbatim.
        assert_eq!(
            legacy,
            NegotiationReply::Error("Arquivo não encontrado".into())
        );
    }

    #[test]
    fn emitted_grant_reparses() {
        let reply = NegotiationReply::grant(5000, "a.txt");
        assert_eq!(
            NegotiationReply::parse(&reply.encode()).unwrap(),
            NegotiationReply::parse(&load_fixture("reply_grant_structured.txt")).unwrap()
        );
    }

    #[test]
    fn ack_generations_parse() {
        let counted = Ack::parse(&load_fixture("ack_counted.txt")).unwrap();
        let bare = Ack::parse(&load_fixture("ack_bare.txt")).unwrap();
        assert_eq!(counted.bytes, Some(2048));
        assert_eq!(bare.bytes, None);
        assert_eq!(counted.encode(), load_fixture("ack_counted.txt"));
        assert_eq!(bare.encode(), load_fixture("ack_bare.txt"));
    }
}
