use lazy_regex::regex_is_match;

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    regex_is_match!(
        r"Android|webOS|iPhone|iPad|iPod|BlackBerry|IEMobile|Opera Mini"i,
        user_agent
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_agents() {
        for ua in [
            "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36",
            "Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X)",
            "Opera/9.80 (J2ME/MIDP; Opera Mini/9.80 (S60; SymbOS; Opera Mobi/23.348; U; en)",
            "mozilla/5.0 (linux; android 10)",
        ] {
            assert!(is_mobile_user_agent(ua), "{ua}");
        }
    }

    #[test]
    fn test_desktop_agents() {
        for ua in [
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/126.0",
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 Safari/605.1.15",
            "",
        ] {
            assert!(!is_mobile_user_agent(ua), "{ua}");
        }
    }
}
