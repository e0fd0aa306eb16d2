//! Static log corpora used across harnesses.
//!
//! Each corpus is a `&'static [&'static str]` of representative payload
//! lines in the shapes real log pipelines emit.

/// Docker `json-file` driver lines: one object per line, `log` at top level.
pub const CORPUS_DOCKER: &[&str] = &[
    r#"{"log":"Server started on :8080\n","stream":"stdout","time":"2024-01-15T10:00:00.123Z"}"#,
    r#"{"log":"GET /healthz 200 OK (1ms)\n","stream":"stdout","time":"2024-01-15T10:00:01.456Z"}"#,
    r#"{"log":"connection refused: redis:6379\n","stream":"stderr","time":"2024-01-15T10:00:02.789Z"}"#,
    r#"{"log":"worker pool scaled to 8\n","stream":"stdout","time":"2024-01-15T10:00:03.012Z"}"#,
];

/// Fluent Bit–style records with the log text nested under `kubernetes`.
pub const CORPUS_KUBERNETES: &[&str] = &[
    r#"{"kubernetes":{"log":"pod api-7f9b4d ready","pod_name":"api-7f9b4d","namespace":"prod"}}"#,
    r#"{"kubernetes":{"log":"liveness probe ok","pod_name":"api-7f9b4d","namespace":"prod"}}"#,
    r#"{"kubernetes":{"log":"","pod_name":"worker-4c2a","namespace":"prod"}}"#,
];

/// Records that match no extraction rule.
pub const CORPUS_NO_LOG: &[&str] = &[
    r#"{"message":"Server started","level":"INFO","port":8080}"#,
    r#"{"msg":"Cache miss","key":"user:42","ttl":300}"#,
];

/// Concatenate corpus lines back-to-back with no separators, the way
/// multiplexed container output arrives on a paste.
pub fn concatenated(corpus: &[&str]) -> String {
    corpus.concat()
}

/// The expected `log` values of [`CORPUS_DOCKER`], in order.
pub fn docker_logs() -> Vec<String> {
    vec![
        "Server started on :8080\n".to_string(),
        "GET /healthz 200 OK (1ms)\n".to_string(),
        "connection refused: redis:6379\n".to_string(),
        "worker pool scaled to 8\n".to_string(),
    ]
}
