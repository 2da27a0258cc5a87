use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let chains_dir = manifest_dir.join("chains");
    println!("cargo::rerun-if-changed={}", chains_dir.display());

    let mut files: Vec<(u64, PathBuf)> = Vec::new();
    for entry in fs::read_dir(&chains_dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "json")
            && let Some(chain_id) =
                path.file_stem().and_then(|s| s.to_str()).and_then(|s| s.parse::<u64>().ok())
        {
            files.push((chain_id, path));
        }
    }
    files.sort_by_key(|(chain_id, _)| *chain_id);

    let mut out = String::from("pub(crate) static EMBEDDED_CHAINS: &[(u64, &str)] = &[\n");
    for (chain_id, path) in files {
        out.push_str(&format!("    ({chain_id}, include_str!({:?})),\n", path.display().to_string()));
    }
    out.push_str("];\n");

    fs::write(PathBuf::from(env::var("OUT_DIR")?).join("embedded_chains.rs"), out)?;
    Ok(())
}
