use url::Url;
use url::form_urlencoded;

/// Build the redirect destination for a stored target.
///
/// Every parameter in `request_query` is set on the target: the first
/// same-named target parameter takes the new value, later duplicates are
/// dropped and unknown names are appended. Other target parameters keep
/// their position.
pub fn merge_query(mut target: Url, request_query: Option<&str>) -> Url {
    let request_pairs: Vec<(String, String)> = match request_query {
        Some(query) if !query.is_empty() => form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect(),
        _ => return target,
    };
    if request_pairs.is_empty() {
        return target;
    }

    let mut pairs: Vec<(String, String)> = target.query_pairs().into_owned().collect();
    for (name, value) in request_pairs {
        set_param(&mut pairs, name, value);
    }

    target.query_pairs_mut().clear().extend_pairs(&pairs);
    target
}

fn set_param(pairs: &mut Vec<(String, String)>, name: String, value: String) {
    match pairs.iter().position(|(n, _)| *n == name) {
        Some(first) => {
            pairs[first].1 = value;
            let mut index = 0;
            pairs.retain(|(n, _)| {
                let keep = index <= first || *n != name;
                index += 1;
                keep
            });
        }
        None => pairs.push((name, value)),
    }
}
