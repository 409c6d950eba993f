//! Algorithm-agnostic key generation tool.
//!
//! Generates a key pair with any registered signature scheme and prints
//! the private key, public key and derived address as wrapped `0x` hex.
//!
//! # Usage
//!
//! ```bash
//! # Ed25519 key, sha256-160 address (human-readable output)
//! agility-keygen
//!
//! # secp256k1 key with an Ethereum-style address, as JSON
//! agility-keygen --algorithm secp256k1 --address keccak256-160 --json
//!
//! # Sign and verify a test transaction with the new key
//! agility-keygen --verify
//! ```

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use agility_core::{CryptoConfig, CryptoProfile, Registry, Transaction};

/// Payload signed by `--verify`.
const VERIFY_MESSAGE: &[u8] = b"agility keypair verification";

/// Algorithm-agnostic key generation tool.
#[derive(Parser, Debug)]
#[command(name = "agility-keygen")]
#[command(about = "Generate keypairs for any registered signature algorithm")]
#[command(version)]
struct Cli {
    /// Signature scheme (ed25519, secp256k1).
    #[arg(long, default_value = "ed25519")]
    algorithm: String,

    /// Hash suite used by --verify (sha256, keccak256).
    #[arg(long, default_value = "sha256")]
    hash: String,

    /// Address suite (sha256-160, keccak256-160).
    #[arg(long, default_value = "sha256-160")]
    address: String,

    /// Output in JSON format for machine parsing.
    #[arg(long)]
    json: bool,

    /// Verify the generated keypair by signing and verifying a test transaction.
    #[arg(long)]
    verify: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Cli {
    /// Algorithm selection named on the command line.
    fn crypto_config(&self) -> CryptoConfig {
        CryptoConfig {
            hash_algorithm: self.hash.clone(),
            address_algorithm: self.address.clone(),
            key_algorithm: self.algorithm.clone(),
        }
    }
}

/// Generated key material, wrapped for the wire.
#[derive(Serialize, Debug)]
struct KeygenOutput {
    /// Signature scheme name.
    algorithm: String,
    /// Wrapped private key.
    private_key: String,
    /// Wrapped public key.
    public_key: String,
    /// Wrapped address.
    address: String,
    /// Whether the self-test ran and passed.
    #[serde(skip_serializing_if = "Option::is_none")]
    verified: Option<bool>,
}

/// Generate a key with `profile` and wrap every part with `registry`'s codec.
fn generate(
    registry: &Registry,
    profile: &CryptoProfile,
    verify: bool,
) -> anyhow::Result<KeygenOutput> {
    let codec = registry.codec();
    let private_key = profile
        .keys
        .generate_private_key()
        .with_context(|| format!("failed to generate {} key", profile.keys.algorithm()))?;
    let public_key = private_key.public_key();
    let address = public_key.address(profile.address.as_ref());

    let verified = if verify {
        let tx = Transaction::new(Some(address.clone()), 0, VERIFY_MESSAGE.to_vec(), 0)
            .sign(private_key.as_ref(), profile.hash.as_ref())
            .context("failed to sign verification transaction")?;
        let wire = codec.wrap_entity(&tx)?;
        let decoded: Transaction = codec.unwrap_entity(&wire)?;
        decoded
            .verify(profile.hash.as_ref())
            .context("generated keypair failed verification")?;
        tracing::debug!("Self-test passed for {} key", private_key.algorithm());
        Some(true)
    } else {
        None
    };

    Ok(KeygenOutput {
        algorithm: private_key.algorithm().to_string(),
        private_key: codec.wrap_to_string(&private_key)?,
        public_key: codec.wrap_to_string(&public_key)?,
        address: codec.wrap_to_string(&address)?,
        verified,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let registry = Registry::standard();
    let profile = cli
        .crypto_config()
        .resolve(&registry)
        .context("unsupported algorithm selection")?;
    tracing::info!("Using {:?}", profile);

    let output = generate(&registry, &profile, cli.verify)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("=== {} Keypair ===", output.algorithm);
        println!();
        println!("Public Key:  {}", output.public_key);
        println!("Private Key: {}", output.private_key);
        println!("Address:     {}", output.address);
        if output.verified.is_some() {
            println!("Self-test:   passed");
        }
        println!();
        println!("IMPORTANT: Store your private key securely!");
        println!("           Never share it with anyone.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use agility_core::{Address, PrivateKey, PublicKey};

    fn profile(registry: &Registry, args: &[&str]) -> CryptoProfile {
        let mut argv = vec!["agility-keygen"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
            .crypto_config()
            .resolve(registry)
            .unwrap()
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["agility-keygen"]);
        assert_eq!(cli.crypto_config(), CryptoConfig::default());
        assert!(!cli.json);
        assert!(!cli.verify);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "agility-keygen",
            "--algorithm",
            "secp256k1",
            "--address",
            "keccak256-160",
            "--json",
            "--verify",
        ]);
        assert_eq!(cli.algorithm, "secp256k1");
        assert_eq!(cli.crypto_config().address_algorithm, "keccak256-160");
        assert!(cli.json && cli.verify);
    }

    #[test]
    fn test_generate_outputs_unwrap() {
        let registry = Registry::standard();
        for args in [&["--algorithm", "ed25519"][..], &["--algorithm", "secp256k1"][..]] {
            let profile = profile(&registry, args);
            let output = generate(&registry, &profile, false).unwrap();
            let codec = registry.codec();

            let private: Arc<dyn PrivateKey> =
                codec.unwrap_from_string(&output.private_key).unwrap();
            let public: Arc<dyn PublicKey> =
                codec.unwrap_from_string(&output.public_key).unwrap();
            let address: Address = codec.unwrap_from_string(&output.address).unwrap();

            assert_eq!(*private.public_key(), *public);
            assert_eq!(public.address(profile.address.as_ref()), address);
            assert_eq!(output.algorithm, args[1]);
            assert_eq!(output.verified, None);
        }
    }

    #[test]
    fn test_generate_with_verify() {
        let registry = Registry::standard();
        let profile = profile(&registry, &["--algorithm", "secp256k1", "--hash", "keccak256"]);
        let output = generate(&registry, &profile, true).unwrap();
        assert_eq!(output.verified, Some(true));
    }

    #[test]
    fn test_json_shape() {
        let registry = Registry::standard();
        let profile = profile(&registry, &[]);
        let output = generate(&registry, &profile, false).unwrap();
        let json: serde_json::Value = serde_json::to_value(&output).unwrap();
        assert!(json["public_key"].as_str().unwrap().starts_with("0x01"));
        assert!(json["address"].as_str().unwrap().starts_with("0x01"));
        assert!(json.get("verified").is_none());
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        let registry = Registry::standard();
        let config = Cli::parse_from(["agility-keygen", "--algorithm", "rsa"]).crypto_config();
        assert!(config.resolve(&registry).is_err());
    }
}
