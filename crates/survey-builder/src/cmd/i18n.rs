use std::env;

use survey_spec::supported_locale;

/// First non-empty value of the POSIX locale variables, in lookup order.
fn env_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|key| env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// First supported locale out of flag, config, environment, then the OS.
pub fn select_locale(cli_locale: Option<&str>, config_locale: Option<&str>) -> String {
    let candidates = [
        cli_locale.map(str::to_string),
        config_locale.map(str::to_string),
        env_locale(),
        sys_locale::get_locale(),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|candidate| supported_locale(&candidate))
        .unwrap_or("en")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_config() {
        assert_eq!(select_locale(Some("mn"), Some("en")), "mn");
        assert_eq!(select_locale(Some("en_GB.UTF-8"), Some("mn")), "en");
    }

    #[test]
    fn unsupported_flag_falls_through_to_config() {
        assert_eq!(select_locale(Some("fr"), Some("mn-MN")), "mn");
    }
}
