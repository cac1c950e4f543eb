// Multipart/form-data framing for single-file uploads
//
// The analysis servers take exactly one file part per request, so the
// encoder only covers that shape. The HTTP client has no built-in
// multipart support; the body is assembled by hand.

use uuid::Uuid;

use crate::constants::BOUNDARY_PREFIX;

/// Generate a fresh boundary token for one request.
pub fn new_boundary() -> String {
    format!("{}{}", BOUNDARY_PREFIX, Uuid::new_v4())
}

/// Build a complete multipart/form-data body holding a single file part.
pub fn encode_file_part(
    boundary: &str,
    field: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

/// Header value announcing the boundary for a body built above.
pub fn content_type_header(boundary: &str) -> String {
    format!("multipart/form-data; boundary={boundary}")
}
