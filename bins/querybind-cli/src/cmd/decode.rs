use querybind::{DecodeError, QueryValues, SignatureCache};

use crate::config::DecodeArgs;
use crate::error::CliError;
use crate::request::SearchRequest;

pub fn run(args: DecodeArgs) -> Result<(), CliError> {
    let seed = match &args.seed {
        Some(path) => {
            let seed = SearchRequest::load(path)?;
            tracing::info!(seed = %path, "loaded seed");
            seed
        }
        None => SearchRequest::default(),
    };

    let decoded = decode_request(&SignatureCache::new(), &args.query, &seed)?;
    println!("{}", serde_json::to_string_pretty(&decoded)?);
    Ok(())
}

/// Decode `query` onto a copy of `seed`. Parameters absent from the query
/// keep the seed's value.
fn decode_request(
    cache: &SignatureCache,
    query: &str,
    seed: &SearchRequest,
) -> Result<SearchRequest, CliError> {
    let signature = cache.get_or_scan(&SearchRequest::default())?;
    let values = QueryValues::parse(query).map_err(DecodeError::from)?;
    Ok(signature.decode(seed, &values)?)
}
