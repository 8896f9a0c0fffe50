//! EDNS cookie ([RFC 7873]) manipulation driven by the query name.
//!
//! Keywords, read root to leaf after the zone labels:
//!
//! * `no-edns`: drop the OPT record.
//! * `c-cookie <hex|none>`: client cookie to return, or `none` to drop the
//!   cookie option.
//! * `s-cookie <hex|none>`: server cookie appended to the client cookie.
//! * `bad <bool>`: answer with BADCOOKIE, keeping the answers only if true.
//!
//! [RFC 7873]: https://tools.ietf.org/html/rfc7873

use hickory_proto::op::{Edns, Message, ResponseCode};
use hickory_proto::rr::rdata::opt::{EdnsCode, EdnsOption};
use qname_relay_application::ports::ResponseTransformer;
use qname_relay_domain::{CommandMapping, ParsedCommand, ValueKind};
use tracing::debug;

pub const COOKIE_OPTION_CODE: u16 = 10;

/// Hex length of a client cookie (8 octets).
const CLIENT_COOKIE_HEX_LEN: usize = 16;

const NONE_SENTINEL: &str = "none";

pub const NO_EDNS: &str = "no-edns";
pub const CLIENT_COOKIE: &str = "c-cookie";
pub const SERVER_COOKIE: &str = "s-cookie";
pub const BAD_COOKIE: &str = "bad";

#[derive(Debug, Default, Clone, Copy)]
pub struct CookieTransformer;

impl CookieTransformer {
    pub fn new() -> Self {
        Self
    }

    /// Lowercase hex of the client part of the cookie the backend returned.
    fn backend_client_cookie(response: &Message) -> String {
        let data = response
            .extensions()
            .as_ref()
            .and_then(|edns| edns.option(EdnsCode::Cookie))
            .and_then(|option| match option {
                EdnsOption::Unknown(_, data) => Some(data.as_slice()),
                _ => None,
            });

        match data {
            Some(data) => hex::encode(data)
                .chars()
                .take(CLIENT_COOKIE_HEX_LEN)
                .collect(),
            None => String::new(),
        }
    }

    fn set_cookie(response: &mut Message, cookie: Vec<u8>) {
        let options = response
            .extensions_mut()
            .get_or_insert_with(Edns::new)
            .options_mut();
        options.remove(EdnsCode::Cookie);
        options.insert(EdnsOption::Unknown(COOKIE_OPTION_CODE, cookie));
    }

    fn remove_cookie(response: &mut Message) {
        if let Some(edns) = response.extensions_mut().as_mut() {
            edns.options_mut().remove(EdnsCode::Cookie);
        }
    }
}

impl ResponseTransformer for CookieTransformer {
    fn name(&self) -> &'static str {
        "cookie"
    }

    fn command_mapping(&self) -> CommandMapping {
        CommandMapping::new()
            .with(CLIENT_COOKIE, &[ValueKind::Str])
            .with(SERVER_COOKIE, &[ValueKind::Str])
            .with(NO_EDNS, &[])
            .with(BAD_COOKIE, &[ValueKind::Bool])
    }

    fn transform(&self, response: &mut Message, command: &ParsedCommand) {
        if command.contains(NO_EDNS) {
            response.extensions_mut().take();
            return;
        }

        let mut cookie = if command.contains(CLIENT_COOKIE) {
            let value = command.first_str(CLIENT_COOKIE).unwrap_or_default();
            if value == NONE_SENTINEL {
                Self::remove_cookie(response);
                return;
            }
            value.to_string()
        } else {
            Self::backend_client_cookie(response)
        };

        if command.contains(SERVER_COOKIE) {
            let value = command.first_str(SERVER_COOKIE).unwrap_or_default();
            if value != NONE_SENTINEL {
                if cookie.is_empty() {
                    cookie = "0".repeat(CLIENT_COOKIE_HEX_LEN);
                }
                cookie.push_str(value);
            }
        }

        if !cookie.is_empty() {
            match hex::decode(&cookie) {
                Ok(bytes) => Self::set_cookie(response, bytes),
                Err(e) => debug!(cookie = %cookie, error = %e, "Cookie is not hex, leaving option as is"),
            }
        }

        if command.contains(BAD_COOKIE) {
            // the upper 8 bits of BADCOOKIE only travel in the OPT record
            response
                .extensions_mut()
                .get_or_insert_with(Edns::new)
                .set_rcode_high(ResponseCode::BADCOOKIE.high());
            response.set_response_code(ResponseCode::BADCOOKIE);

            if !command.first_bool(BAD_COOKIE).unwrap_or(false) {
                response.take_answers();
            }
        }
    }
}
