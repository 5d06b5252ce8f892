use querybind::SignatureCache;

use crate::error::CliError;
use crate::request::SearchRequest;

pub fn run() -> Result<(), CliError> {
    println!("{}", render(&SignatureCache::new())?);
    Ok(())
}

fn render(cache: &SignatureCache) -> Result<String, CliError> {
    let signature = cache.get_or_scan(&SearchRequest::default())?;
    tracing::info!(
        record = signature.record_type().name,
        parameters = signature.parameters().len(),
        "scanned signature"
    );
    Ok(serde_json::to_string_pretty(&*signature)?)
}
