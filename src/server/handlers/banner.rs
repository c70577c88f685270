//! Usage banner handler.

/// Plain-text usage banner served at `/`
const BANNER: &str = "URL WHOIS INFO API (v1.0)\n\n\
                      Author: http://github.com/methylDragon\n\
                      Usage: /url_whois/api/v1.0/URL-TO-ANALYSE";

pub async fn banner_handler() -> &'static str {
    BANNER
}
