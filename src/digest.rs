use std::collections::HashMap;

use md5::{Digest, Md5};
use regex::Regex;

use crate::error::SalonError;

/// HTTP Digest access authentication (RFC 2617) with the MD5 algorithm,
/// enough for the challenge/response handshake Virtuoso performs.
#[derive(Debug, Clone)]
pub struct DigestAuth {
    username: String,
    password: String,
}

impl DigestAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Builds the Authorization header value answering a server
    /// challenge for the given request method and request-URI.
    pub fn authorization(
        &self,
        method: &str,
        uri: &str,
        challenge: &str,
    ) -> Result<String, SalonError> {
        let params = parse_challenge(challenge)?;
        let realm = required(&params, "realm")?;
        let nonce = required(&params, "nonce")?;

        let qop = match params.get("qop") {
            Some(offered) => {
                if !offered.split(',').any(|qop| qop.trim() == "auth") {
                    return Err(SalonError::DigestAuth(format!(
                        "unsupported qop: {offered}"
                    )));
                }
                Some("auth")
            }
            None => None,
        };

        let nc = "00000001";
        let cnonce = hex::encode(rand::random::<u128>().to_be_bytes());
        let response = compute_response(
            &self.username,
            &self.password,
            realm,
            nonce,
            method,
            uri,
            qop,
            nc,
            &cnonce,
        );

        let mut header = format!(
            "Digest username=\"{}\", realm=\"{realm}\", nonce=\"{nonce}\", uri=\"{uri}\", response=\"{response}\"",
            self.username
        );
        if let Some(qop) = qop {
            header.push_str(&format!(", qop={qop}, nc={nc}, cnonce=\"{cnonce}\""));
        }
        if let Some(opaque) = params.get("opaque") {
            header.push_str(&format!(", opaque=\"{opaque}\""));
        }
        header.push_str(", algorithm=MD5");
        Ok(header)
    }
}

fn required<'a>(
    params: &'a HashMap<String, String>,
    name: &str,
) -> Result<&'a String, SalonError> {
    params
        .get(name)
        .ok_or_else(|| SalonError::DigestAuth(format!("challenge missing {name}")))
}

fn parse_challenge(challenge: &str) -> Result<HashMap<String, String>, SalonError> {
    let param = Regex::new(r#"(\w+)=(?:"([^"]*)"|([^",\s]+))"#).unwrap();

    let rest = challenge
        .trim()
        .strip_prefix("Digest")
        .ok_or_else(|| SalonError::DigestAuth(format!("unsupported challenge: {challenge}")))?;

    let mut params = HashMap::new();
    for capture in param.captures_iter(rest) {
        let key = capture[1].to_lowercase();
        let value = capture
            .get(2)
            .or_else(|| capture.get(3))
            .map(|group| group.as_str().to_string())
            .unwrap_or_default();
        params.insert(key, value);
    }
    Ok(params)
}

#[allow(clippy::too_many_arguments)]
fn compute_response(
    username: &str,
    password: &str,
    realm: &str,
    nonce: &str,
    method: &str,
    uri: &str,
    qop: Option<&str>,
    nc: &str,
    cnonce: &str,
) -> String {
    let ha1 = md5_hex(&format!("{username}:{realm}:{password}"));
    let ha2 = md5_hex(&format!("{method}:{uri}"));
    match qop {
        Some(qop) => md5_hex(&format!("{ha1}:{nonce}:{nc}:{cnonce}:{qop}:{ha2}")),
        None => md5_hex(&format!("{ha1}:{nonce}:{ha2}")),
    }
}

fn md5_hex(input: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
