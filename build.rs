use std::fs;
use std::time::UNIX_EPOCH;

const MOCK_DATA_PATH: &str = "data/mock_data.json";

fn main() {
    // 埋め込むモックデータの更新日時（フッター表示用）
    let modified = fs::metadata(MOCK_DATA_PATH)
        .and_then(|m| m.modified())
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok());

    match modified {
        Some(duration) => println!("cargo:rustc-env=MOCK_DATA_MODIFIED={}", duration.as_secs()),
        None => println!("cargo:warning=Could not read {}", MOCK_DATA_PATH),
    }

    println!("cargo:rerun-if-changed={}", MOCK_DATA_PATH);
}
