// Status line plus content type. The server appends length and the blank line.
pub const OK_RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n";
pub const OK_TEXT_RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=UTF-8\r\n";
pub const CREATED_TEXT_RESPONSE: &str =
    "HTTP/1.1 201 Created\r\nContent-Type: text/plain; charset=UTF-8\r\n";
pub const BAD_REQUEST: &str = "HTTP/1.1 400 Bad Request\r\nContent-Type: application/json\r\n";
pub const NOT_FOUND: &str = "HTTP/1.1 404 NOT FOUND\r\nContent-Type: application/json\r\n";
pub const INTERNAL_ERROR: &str =
    "HTTP/1.1 500 INTERNAL ERROR\r\nContent-Type: application/json\r\n";

pub const INVALID_CREATE_BODY: &str = "request body is invalid!";
pub const INVALID_UPDATE_BODY: &str = "request body is invalid";
pub const CREATE_SUCCESS: &str = "create wallet success";
pub const UPDATE_SUCCESS: &str = "update wallet success";
