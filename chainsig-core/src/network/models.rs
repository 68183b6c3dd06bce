// chainsig-core/src/network/models.rs
//
// Contract Query Models - typed JSON-RPC structs cho view call `public_key`
//
// Library không ship HTTP client: caller tự gửi request qua transport của mình
// rồi đưa response vào `CallFunctionResult`.

use crate::crypto::public_key::RootPublicKey;
use crate::error::{ChainSigResult, DecodeError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// View method trên signer contract trả về root public key
pub const PUBLIC_KEY_METHOD: &str = "public_key";

// =============================================================================
// REQUEST
// =============================================================================

/// Block finality cho view call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finality {
    Optimistic,
    #[default]
    Final,
}

/// `query` params with `request_type = "call_function"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFunctionRequest {
    pub request_type: String,
    pub finality: Finality,
    pub account_id: String,
    pub method_name: String,
    /// JSON args, base64 encoded
    pub args_base64: String,
}

impl CallFunctionRequest {
    pub fn new(account_id: impl Into<String>, method_name: impl Into<String>, args: &[u8]) -> Self {
        Self {
            request_type: "call_function".to_string(),
            finality: Finality::default(),
            account_id: account_id.into(),
            method_name: method_name.into(),
            args_base64: BASE64.encode(args),
        }
    }

    /// `public_key` view call with `{}` args.
    pub fn public_key(contract_id: impl Into<String>) -> Self {
        Self::new(contract_id, PUBLIC_KEY_METHOD, b"{}")
    }

    pub fn with_finality(mut self, finality: Finality) -> Self {
        self.finality = finality;
        self
    }

    /// Wrap into a JSON-RPC 2.0 `query` envelope.
    pub fn into_rpc(self, id: impl Into<String>) -> JsonRpcRequest<Self> {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: id.into(),
            method: "query".to_string(),
            params: self,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcRequest<P> {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    pub params: P,
}

// =============================================================================
// RESPONSE
// =============================================================================

/// `result` object of a `call_function` query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFunctionResult {
    /// Raw return bytes (JSON encoded by the contract)
    pub result: Vec<u8>,
    #[serde(default)]
    pub logs: Vec<String>,
    #[serde(default)]
    pub block_height: u64,
    #[serde(default)]
    pub block_hash: String,
}

impl CallFunctionResult {
    /// Decode the return value of `public_key`: a JSON string `"secp256k1:<base58>"`.
    pub fn root_public_key(&self) -> ChainSigResult<RootPublicKey> {
        let encoded: String = serde_json::from_slice(&self.result)
            .map_err(|e| DecodeError::Serialization(e.to_string()))?;
        RootPublicKey::parse(&encoded)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChainSigError;
    use serde_json::json;

    const ROOT_KEY: &str = "secp256k1:37aFybhUHCxRdDkuCcB3yHzxqK7N8EQ745MujyAQohXSsYymVeHzhLxKvZ2qYeRHf3pGFiAsxqFJZjpF9gP2JV5u";

    #[test]
    fn test_public_key_request() {
        let request = CallFunctionRequest::public_key("v1.signer-prod.testnet").into_rpc("dontcare");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": "dontcare",
                "method": "query",
                "params": {
                    "request_type": "call_function",
                    "finality": "final",
                    "account_id": "v1.signer-prod.testnet",
                    "method_name": "public_key",
                    "args_base64": "e30="
                }
            })
        );
    }

    #[test]
    fn test_finality() {
        let request = CallFunctionRequest::public_key("v1.signer").with_finality(Finality::Optimistic);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["finality"], "optimistic");
    }

    #[test]
    fn test_decode_root_key() {
        let body = json!({
            "result": serde_json::to_vec(ROOT_KEY).unwrap(),
            "logs": [],
            "block_height": 17_000_000u64,
            "block_hash": "8Xbc4UPS5Wr2ZwoyQWbqZ8rT5Rne6FEN1ZfTrvVG7vyP"
        });
        let result: CallFunctionResult = serde_json::from_value(body).unwrap();
        let root = result.root_public_key().unwrap();
        assert_eq!(root.to_string(), ROOT_KEY);
    }

    #[test]
    fn test_decode_minimal_result() {
        let result: CallFunctionResult =
            serde_json::from_value(json!({ "result": serde_json::to_vec(ROOT_KEY).unwrap() }))
                .unwrap();
        assert!(result.logs.is_empty());
        assert!(result.root_public_key().is_ok());
    }

    #[test]
    fn test_decode_not_json_string() {
        let result = CallFunctionResult {
            result: ROOT_KEY.as_bytes().to_vec(),
            logs: vec![],
            block_height: 0,
            block_hash: String::new(),
        };
        assert!(matches!(
            result.root_public_key(),
            Err(ChainSigError::Decode(DecodeError::Serialization(_)))
        ));
    }

    #[test]
    fn test_decode_wrong_curve() {
        let result = CallFunctionResult {
            result: serde_json::to_vec("ed25519:6E8sCci9badyRkXb3JoRpBj5p8C6Tw41ELDZoiihKEtp").unwrap(),
            logs: vec![],
            block_height: 0,
            block_hash: String::new(),
        };
        assert_eq!(
            result.root_public_key(),
            Err(DecodeError::UnsupportedCurve("ed25519".to_string()).into())
        );
    }
}
