use super::http_client::encode_path_segment;
use super::*;

#[test]
fn base_url_trailing_slashes_are_trimmed() {
    let client = RemoteClient::new("http://127.0.0.1:3001/").expect("client");
    assert_eq!(client.base_url(), "http://127.0.0.1:3001");
    assert_eq!(client.url("/persons"), "http://127.0.0.1:3001/persons");
}

#[test]
fn person_urls_escape_opaque_ids() {
    let client = RemoteClient::new("http://h").expect("client");
    assert_eq!(
        client.person_url(&PersonId::new("a1b2")),
        "http://h/persons/a1b2"
    );
    assert_eq!(
        client.person_url(&PersonId::new("a/b c")),
        "http://h/persons/a%2Fb%20c"
    );
    assert_eq!(encode_path_segment("x-y_z.~"), "x-y_z.~");
}

#[test]
fn unreachable_remote_is_a_transport_error() {
    // Nothing listens on the discard port in test environments.
    let client = RemoteClient::new("http://127.0.0.1:9").expect("client");
    let err = client.fetch_all().unwrap_err();
    match err {
        TransportError::Unreachable { label, .. } => assert_eq!(label, "list persons"),
        other => panic!("expected unreachable, got {:?}", other),
    }
}
