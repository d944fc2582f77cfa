/// A single impersonated header: `(name, value, https_only)`.
pub type StaticHeader = (&'static str, &'static str, bool);

// [TODO!]
// Note that not all requests are made the same:
//  - on forced (Ctrl+R) reloads, Chrome sets Cache-Control: max-age=0
//  - when the URL is in the address bar (but not submitted yet), Chrome sets `Purpose: prefetch` and `Sec-Purpose: prefetch`
pub static CHROME_HEADERS: &[StaticHeader] = &[
    ("sec-ch-ua", "\"Google Chrome\";v=\"125\", \"Chromium\";v=\"125\", \"Not.A/Brand\";v=\"24\"", true),
    ("sec-ch-ua-mobile", "?0", true),
    ("sec-ch-ua-platform", "\"Linux\"", true),
    ("upgrade-insecure-requests", "1", false),
    ("user-agent", "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36", false),
    ("accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7", false),
    ("sec-fetch-site", "none", true),
    ("sec-fetch-mode", "navigate", true),
    ("sec-fetch-user", "?1", true),
    ("sec-fetch-dest", "document", true),
    ("accept-encoding", "gzip, deflate, br, zstd", false),
    ("accept-language", "en-US,en;q=0.9", false),
];

pub static FIREFOX_HEADERS: &[StaticHeader] = &[
    ("User-Agent", "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0", false),
    ("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/png,image/svg+xml,*/*;q=0.8", false),
    ("Accept-Language", "en,cs;q=0.7,en-US;q=0.3", false),
    ("Accept-Encoding", "gzip, deflate, br, zstd", false),
    ("sec-fetch-dest", "document", true),
    ("sec-fetch-mode", "navigate", true),
    ("sec-fetch-site", "none", true),
    ("sec-fetch-user", "?1", true),
    ("Upgrade-Insecure-Requests", "1", false),
    ("Priority", "u=0, i", false),
];
