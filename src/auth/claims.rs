use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    #[default]
    #[serde(alias = "Access")]
    Access,
    #[serde(alias = "Refresh")]
    Refresh,
}

/// Bearer token payload as issued by the identity service. Tokens without a
/// `kind` are access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberClaims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
    pub iss: String,
    pub aud: String,
    #[serde(default)]
    pub kind: TokenKind,
}

impl MemberClaims {
    /// The member this token speaks for; refresh tokens speak for nobody.
    pub fn member_id(&self) -> Option<Uuid> {
        (self.kind == TokenKind::Access).then_some(self.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_kind_means_access() {
        let sub = Uuid::new_v4();
        let claims: MemberClaims = serde_json::from_value(serde_json::json!({
            "sub": sub, "iat": 0, "exp": 1, "iss": "i", "aud": "a"
        }))
        .unwrap();
        assert_eq!(claims.member_id(), Some(sub));
    }

    #[test]
    fn refresh_token_has_no_member() {
        let claims: MemberClaims = serde_json::from_value(serde_json::json!({
            "sub": Uuid::nil(), "iat": 0, "exp": 1, "iss": "i", "aud": "a", "kind": "Refresh"
        }))
        .unwrap();
        assert_eq!(claims.kind, TokenKind::Refresh);
        assert_eq!(claims.member_id(), None);
    }
}
