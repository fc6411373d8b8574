//! NEP-6 wallet files.

use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use neo_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::nep2::{encrypt_key, EncryptedKey};
use crate::{scrypt_params_is_valid, KeyPair, ScryptParameters};

const NEP6_VERSION: &str = "1.0";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nep6Wallet {
    #[serde(default)]
    pub name: Option<String>,
    pub version: String,
    pub scrypt: ScryptParameters,
    #[serde(default)]
    pub accounts: Vec<Nep6Account>,
    #[serde(default)]
    pub extra: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nep6Account {
    pub address: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub lock: bool,
    /// NEP-2 encrypted private key; watch-only accounts have none.
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub contract: Option<Nep6Contract>,
    #[serde(default)]
    pub extra: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nep6Contract {
    /// Base64 verification script.
    pub script: String,
    pub parameters: Vec<Nep6Parameter>,
    pub deployed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nep6Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl Nep6Contract {
    fn signature(key_pair: &KeyPair) -> Self {
        Self {
            script: STANDARD.encode(key_pair.verification_script()),
            parameters: vec![Nep6Parameter {
                name: "signature".to_string(),
                type_name: "Signature".to_string(),
            }],
            deployed: false,
        }
    }
}

impl Nep6Wallet {
    /// Creates an empty wallet whose accounts will be wrapped with `scrypt`.
    pub fn new(name: impl Into<String>, scrypt: ScryptParameters) -> Result<Self> {
        scrypt.ensure_valid()?;
        Ok(Self {
            name: Some(name.into()),
            version: NEP6_VERSION.to_string(),
            scrypt,
            accounts: Vec::new(),
            extra: None,
        })
    }

    /// Parses a wallet, rejecting unusable scrypt parameters up front.
    pub fn from_json(json: &str) -> Result<Self> {
        let wallet: Self = serde_json::from_str(json)
            .map_err(|e| Error::invalid_format(format!("invalid NEP-6 wallet: {e}")))?;
        if !scrypt_params_is_valid(&wallet.scrypt) {
            return Err(Error::invalid_format(format!(
                "wallet has invalid {}",
                wallet.scrypt
            )));
        }
        Ok(wallet)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::invalid_format(format!("failed to encode NEP-6 wallet: {e}")))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let wallet = Self::from_json(&text)?;
        debug!(
            path = %path.as_ref().display(),
            accounts = wallet.accounts.len(),
            "loaded NEP-6 wallet"
        );
        Ok(wallet)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }

    pub fn account(&self, address: &str) -> Option<&Nep6Account> {
        self.accounts.iter().find(|a| a.address == address)
    }

    pub fn default_account(&self) -> Option<&Nep6Account> {
        self.accounts.iter().find(|a| a.is_default)
    }

    /// Encrypts `raw_key` with the wallet's scrypt parameters and adds it as
    /// a standard signature account. The first account becomes the default.
    pub fn add_account(
        &mut self,
        raw_key: &[u8],
        password: &str,
        label: Option<&str>,
    ) -> Result<&Nep6Account> {
        let key_pair = KeyPair::from_private_key(raw_key)?;
        let address = key_pair.address();
        if self.account(&address).is_some() {
            return Err(Error::invalid_argument(format!(
                "account {address} already exists"
            )));
        }

        let encrypted = encrypt_key(raw_key, password, &self.scrypt)?;
        let is_default = self.default_account().is_none();
        debug!(%address, is_default, "adding NEP-6 account");

        let index = self.accounts.len();
        self.accounts.push(Nep6Account {
            address,
            label: label.map(str::to_string),
            is_default,
            lock: false,
            key: Some(encrypted.as_str().to_string()),
            contract: Some(Nep6Contract::signature(&key_pair)),
            extra: None,
        });
        Ok(&self.accounts[index])
    }

    /// Decrypts the key of the account at `address`.
    pub fn decrypt_account(&self, address: &str, password: &str) -> Result<KeyPair> {
        let account = self
            .account(address)
            .ok_or_else(|| Error::invalid_argument(format!("no account {address}")))?;
        let key = account
            .key
            .as_deref()
            .ok_or_else(|| Error::invalid_argument(format!("account {address} is watch-only")))?;

        let private_key = EncryptedKey::new(key, self.scrypt).decrypt(password)?;
        let key_pair = KeyPair::from_private_key(private_key.as_slice())?;
        if key_pair.address() != account.address {
            return Err(Error::invalid_format(format!(
                "key of account {address} belongs to {}",
                key_pair.address()
            )));
        }
        Ok(key_pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> ScryptParameters {
        ScryptParameters::new(16, 1, 1, 64).unwrap()
    }

    #[test]
    fn test_add_and_decrypt_account() {
        let mut wallet = Nep6Wallet::new("test", fast()).unwrap();
        let account = wallet
            .add_account(&[0x01; 32], "correct", Some("main"))
            .unwrap();
        assert_eq!(account.address, "NUz6PKTAM7NbPJzkKJFNay3VckQtcDkgWo");
        assert!(account.is_default);
        assert_eq!(account.label.as_deref(), Some("main"));
        assert_eq!(
            account.key.as_deref(),
            Some("6PYWucwbtX9Zii9BAmYr5vjK83RiBTLD97TrNEKB2v3KErHnDpEqDVFGwm")
        );

        let key_pair = wallet
            .decrypt_account("NUz6PKTAM7NbPJzkKJFNay3VckQtcDkgWo", "correct")
            .unwrap();
        assert_eq!(key_pair.private_key(), &[0x01; 32]);

        let err = wallet
            .decrypt_account("NUz6PKTAM7NbPJzkKJFNay3VckQtcDkgWo", "wrong")
            .unwrap_err();
        assert!(err.is_wrong_password());
    }

    #[test]
    fn test_duplicate_and_missing_accounts() {
        let mut wallet = Nep6Wallet::new("test", fast()).unwrap();
        wallet.add_account(&[0x01; 32], "pw", None).unwrap();
        assert!(matches!(
            wallet.add_account(&[0x01; 32], "pw", None),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            wallet.decrypt_account("NPTmAHDxo6Pkyic8Nvu3kwyXoYJCvcCB6i", "pw"),
            Err(Error::InvalidArgument(_))
        ));

        let second = wallet.add_account(&[0x02; 32], "pw", None).unwrap();
        assert!(!second.is_default);
        assert_eq!(wallet.accounts.len(), 2);
    }

    #[test]
    fn test_contract_shape() {
        let mut wallet = Nep6Wallet::new("test", fast()).unwrap();
        let account = wallet.add_account(&[0x01; 32], "pw", None).unwrap();
        let contract = account.contract.as_ref().unwrap();
        let script = STANDARD.decode(&contract.script).unwrap();
        assert_eq!(script.len(), 40);
        assert_eq!(&script[..2], &[0x0C, 0x21]);
        assert_eq!(&script[35..], &[0x41, 0x56, 0xE7, 0xB3, 0x27]);
        assert_eq!(contract.parameters[0].type_name, "Signature");
        assert!(!contract.deployed);
    }

    #[test]
    fn test_json_round_trip() {
        let mut wallet = Nep6Wallet::new("test", fast()).unwrap();
        wallet.add_account(&[0x01; 32], "pw", Some("a")).unwrap();
        let json = wallet.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["scrypt"]["n"], 16);
        assert_eq!(value["accounts"][0]["isDefault"], true);
        assert_eq!(value["accounts"][0]["contract"]["parameters"][0]["type"], "Signature");

        assert_eq!(Nep6Wallet::from_json(&json).unwrap(), wallet);
    }

    #[test]
    fn test_rejects_invalid_scrypt() {
        let json = r#"{
            "name": "bad",
            "version": "1.0",
            "scrypt": {"n": 1000, "r": 8, "p": 8},
            "accounts": []
        }"#;
        assert!(matches!(
            Nep6Wallet::from_json(json),
            Err(Error::InvalidFormat(_))
        ));
        assert!(Nep6Wallet::new("bad", ScryptParameters { n: 0, ..fast() }).is_err());
    }

    #[test]
    fn test_watch_only_account() {
        let json = r#"{
            "name": null,
            "version": "1.0",
            "scrypt": {"n": 16, "r": 1, "p": 1},
            "accounts": [{"address": "NUz6PKTAM7NbPJzkKJFNay3VckQtcDkgWo", "isDefault": false, "lock": false}]
        }"#;
        let wallet = Nep6Wallet::from_json(json).unwrap();
        assert!(wallet.default_account().is_none());
        assert!(matches!(
            wallet.decrypt_account("NUz6PKTAM7NbPJzkKJFNay3VckQtcDkgWo", "pw"),
            Err(Error::InvalidArgument(_))
        ));
    }
}
