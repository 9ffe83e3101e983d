use crate::cookies::AUTH_COOKIE_PREFIX;

/// Masks auth cookie tokens embedded in strings, keeping the first 5 chars of the token.
/// Use this for ANY log output that may include a cookie header.
pub fn sanitize_auth_token(input: &str) -> String {
    input
        .split(AUTH_COOKIE_PREFIX)
        .enumerate()
        .map(|(i, part)| {
            if i == 0 {
                return part.to_string();
            }

            let (account, rest) = match part.split_once('=') {
                Some(pair) => pair,
                None => return format!("{AUTH_COOKIE_PREFIX}{part}"),
            };

            let token_len = rest
                .chars()
                .take_while(|c| *c != ';' && !c.is_whitespace() && *c != '"')
                .map(char::len_utf8)
                .sum::<usize>();
            let (token, tail) = rest.split_at(token_len);

            let visible: String = token.chars().take(5).collect();
            format!("{AUTH_COOKIE_PREFIX}{account}={visible}*****{tail}")
        })
        .collect()
}
