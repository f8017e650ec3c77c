use devprint_core::hash::fast_hash;
use devprint_core::{Digester, Sha256Digester};

pub fn execute(text: &str, fast: bool) -> anyhow::Result<()> {
    println!("{}", digest(text, fast)?);
    Ok(())
}

fn digest(text: &str, fast: bool) -> anyhow::Result<String> {
    if fast {
        return Ok(fast_hash(text));
    }
    Ok(Sha256Digester.digest_hex(text)?)
}
