use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};

// Prints a fresh API token for API_TOKEN, followed by its SHA-256 digest.
fn main() {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    let token = URL_SAFE_NO_PAD.encode(bytes);

    let digest = hex::encode(Sha256::digest(token.as_bytes()));
    println!("{token}");
    println!("sha256: {digest}");
}
