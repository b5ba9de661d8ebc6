//! Markup extraction: per field, the first non-empty match from an ordered
//! list of selector lookups wins.

use scraper::{Html, Selector};
use url::Url;

use super::PageMetadata;

/// Currency symbol → ISO code. Checked against the raw price text when the
/// page carries no explicit currency metadata.
const CURRENCY_SYMBOLS: &[(char, &str)] = &[
    ('$', "USD"),
    ('€', "EUR"),
    ('£', "GBP"),
    ('¥', "JPY"),
    ('₹', "INR"),
];

/// Extracts metadata from an HTML document.
///
/// `base` is the final URL the document was fetched from; relative image
/// paths are resolved against it.
pub fn extract(html: &str, base: &Url) -> PageMetadata {
    let doc = Html::parse_document(html);

    let title = first_non_empty([
        meta_content(&doc, r#"meta[property="og:title"]"#),
        meta_content(&doc, r#"meta[name="twitter:title"]"#),
        meta_content(&doc, r#"meta[name="title"]"#),
        text_content(&doc, "title"),
        text_content(&doc, "h1"),
    ]);

    let description = first_non_empty([
        meta_content(&doc, r#"meta[property="og:description"]"#),
        meta_content(&doc, r#"meta[name="twitter:description"]"#),
        meta_content(&doc, r#"meta[name="description"]"#),
    ]);

    let raw_image = first_non_empty([
        meta_content(&doc, r#"meta[property="og:image"]"#),
        meta_content(&doc, r#"meta[property="og:image:url"]"#),
        meta_content(&doc, r#"meta[name="twitter:image"]"#),
        attr_content(&doc, r#"link[rel="image_src"]"#, "href"),
    ]);
    let image = resolve_image_url(&raw_image, base);

    let raw_price = first_non_empty([
        meta_content(&doc, r#"meta[property="product:price:amount"]"#),
        meta_content(&doc, r#"meta[property="og:price:amount"]"#),
        attr_content(&doc, r#"[itemprop="price"]"#, "content"),
        text_content(&doc, r#"[itemprop="price"]"#),
    ]);
    let price = strip_price(&raw_price);

    let explicit_currency = first_non_empty([
        meta_content(&doc, r#"meta[property="product:price:currency"]"#),
        meta_content(&doc, r#"meta[property="og:price:currency"]"#),
    ]);
    let currency = infer_currency(&explicit_currency, &raw_price);

    let site_name = first_non_empty([
        meta_content(&doc, r#"meta[property="og:site_name"]"#),
        base.host_str().unwrap_or_default().to_string(),
    ]);

    // Classification is last-applied-wins: product overrides website,
    // video overrides product.
    let mut kind = "website";
    if !raw_price.is_empty() {
        kind = "product";
    }
    let has_video = !first_non_empty([
        meta_content(&doc, r#"meta[property="og:video"]"#),
        meta_content(&doc, r#"meta[property="og:video:url"]"#),
        meta_content(&doc, r#"meta[name="twitter:player"]"#),
    ])
    .is_empty();
    if has_video {
        kind = "video";
    }

    PageMetadata {
        title,
        description,
        image,
        price,
        currency,
        site_name,
        kind: kind.to_string(),
    }
}

/// Builds the placeholder returned when fetching or parsing fails.
///
/// Derived purely from the URL's hostname, with a leading `www.` stripped.
pub fn fallback_metadata(url: &str) -> PageMetadata {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string());
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();

    PageMetadata {
        title: host.clone(),
        description: format!("Visit {}", host),
        ..PageMetadata::default()
    }
}

fn first_non_empty<const N: usize>(candidates: [String; N]) -> String {
    candidates
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// First match's `content` attribute, trimmed. Empty on no match.
fn meta_content(doc: &Html, selector: &str) -> String {
    attr_content(doc, selector, "content")
}

fn attr_content(doc: &Html, selector: &str, attr: &str) -> String {
    Selector::parse(selector)
        .ok()
        .and_then(|sel| {
            doc.select(&sel)
                .next()
                .and_then(|el| el.value().attr(attr))
                .map(|v| v.trim().to_string())
        })
        .unwrap_or_default()
}

/// First match's text content, whitespace-collapsed. Empty on no match.
fn text_content(doc: &Html, selector: &str) -> String {
    Selector::parse(selector)
        .ok()
        .and_then(|sel| {
            doc.select(&sel).next().map(|el| {
                el.text()
                    .collect::<Vec<_>>()
                    .join(" ")
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ")
            })
        })
        .unwrap_or_default()
}

/// Strips everything but digits and `.`/`,` from a price string.
fn strip_price(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect()
}

/// Explicit metadata wins; otherwise the first known symbol in the raw
/// price text; otherwise USD.
fn infer_currency(explicit: &str, raw_price: &str) -> String {
    if !explicit.is_empty() {
        return explicit.to_uppercase();
    }

    for (symbol, code) in CURRENCY_SYMBOLS {
        if raw_price.contains(*symbol) {
            return (*code).to_string();
        }
    }

    "USD".to_string()
}

/// Resolves a possibly-relative image URL against the page origin.
/// Resolution failure yields an empty string, never an error.
fn resolve_image_url(raw: &str, base: &Url) -> String {
    if raw.is_empty() {
        return String::new();
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }

    base.join(raw).map(|u| u.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://shop.example.com/item/42").unwrap()
    }

    #[test]
    fn test_og_title_only_leaves_everything_else_defaulted() {
        let html = r#"<html><head><meta property="og:title" content="Foo"></head><body></body></html>"#;
        let meta = extract(html, &base());

        assert_eq!(meta.title, "Foo");
        assert_eq!(meta.description, "");
        assert_eq!(meta.image, "");
        assert_eq!(meta.price, "");
        assert_eq!(meta.currency, "USD");
        assert_eq!(meta.kind, "website");
    }

    #[test]
    fn test_title_fallback_order() {
        // og:title beats everything.
        let html = r#"<head>
            <meta property="og:title" content="OG">
            <meta name="twitter:title" content="TW">
            <title>Doc</title>
        </head><body><h1>Heading</h1></body>"#;
        assert_eq!(extract(html, &base()).title, "OG");

        // Without og:title, twitter wins.
        let html = r#"<head>
            <meta name="twitter:title" content="TW">
            <title>Doc</title>
        </head>"#;
        assert_eq!(extract(html, &base()).title, "TW");

        // Then the title element.
        let html = r#"<head><title>Doc</title></head><body><h1>Heading</h1></body>"#;
        assert_eq!(extract(html, &base()).title, "Doc");

        // Then the first heading.
        let html = r#"<body><h1>Heading</h1></body>"#;
        assert_eq!(extract(html, &base()).title, "Heading");

        // Nothing at all: empty.
        assert_eq!(extract("<body></body>", &base()).title, "");
    }

    #[test]
    fn test_empty_og_title_falls_through() {
        let html = r#"<head>
            <meta property="og:title" content="">
            <title>Doc</title>
        </head>"#;
        assert_eq!(extract(html, &base()).title, "Doc");
    }

    #[test]
    fn test_description_fallback_order() {
        let html = r#"<head><meta name="description" content="generic"></head>"#;
        assert_eq!(extract(html, &base()).description, "generic");

        let html = r#"<head>
            <meta property="og:description" content="og desc">
            <meta name="description" content="generic">
        </head>"#;
        assert_eq!(extract(html, &base()).description, "og desc");
    }

    #[test]
    fn test_relative_image_resolved_against_origin() {
        let html = r#"<head><meta property="og:image" content="/img/cover.png"></head>"#;
        assert_eq!(
            extract(html, &base()).image,
            "https://shop.example.com/img/cover.png"
        );
    }

    #[test]
    fn test_absolute_image_kept_as_is() {
        let html = r#"<head><meta property="og:image" content="https://cdn.example.com/a.png"></head>"#;
        assert_eq!(extract(html, &base()).image, "https://cdn.example.com/a.png");
    }

    #[test]
    fn test_price_is_stripped_to_digits_and_punctuation() {
        let html = r#"<head><meta property="product:price:amount" content="$1,299.99 USD"></head>"#;
        let meta = extract(html, &base());

        assert_eq!(meta.price, "1,299.99");
        assert_eq!(meta.kind, "product");
    }

    #[test]
    fn test_currency_from_explicit_metadata() {
        let html = r#"<head>
            <meta property="product:price:amount" content="10">
            <meta property="product:price:currency" content="eur">
        </head>"#;
        assert_eq!(extract(html, &base()).currency, "EUR");
    }

    #[test]
    fn test_currency_from_symbol_in_price_text() {
        let html = r#"<head><meta property="og:price:amount" content="£15.00"></head>"#;
        let meta = extract(html, &base());

        assert_eq!(meta.currency, "GBP");
        assert_eq!(meta.price, "15.00");
    }

    #[test]
    fn test_currency_defaults_to_usd() {
        let html = r#"<head><meta property="og:price:amount" content="15.00"></head>"#;
        assert_eq!(extract(html, &base()).currency, "USD");
    }

    #[test]
    fn test_itemprop_price_text_fallback() {
        let html = r#"<body><span itemprop="price">₹499</span></body>"#;
        let meta = extract(html, &base());

        assert_eq!(meta.price, "499");
        assert_eq!(meta.currency, "INR");
        assert_eq!(meta.kind, "product");
    }

    #[test]
    fn test_video_overrides_product() {
        let html = r#"<head>
            <meta property="product:price:amount" content="9.99">
            <meta property="og:video" content="https://example.com/v.mp4">
        </head>"#;
        assert_eq!(extract(html, &base()).kind, "video");
    }

    #[test]
    fn test_site_name_falls_back_to_host() {
        let html = r#"<head><meta property="og:site_name" content="Example Shop"></head>"#;
        assert_eq!(extract(html, &base()).site_name, "Example Shop");

        assert_eq!(extract("<body></body>", &base()).site_name, "shop.example.com");
    }

    #[test]
    fn test_fallback_metadata_from_hostname() {
        let meta = fallback_metadata("https://nope.invalid/page");

        assert_eq!(meta.title, "nope.invalid");
        assert_eq!(meta.description, "Visit nope.invalid");
        assert_eq!(meta.kind, "website");
        assert_eq!(meta.image, "");
    }

    #[test]
    fn test_fallback_metadata_strips_www() {
        let meta = fallback_metadata("https://www.example.com/");

        assert_eq!(meta.title, "example.com");
        assert_eq!(meta.description, "Visit example.com");
    }

    #[test]
    fn test_fallback_metadata_unparseable_url() {
        let meta = fallback_metadata("not a url");

        assert_eq!(meta.title, "not a url");
        assert_eq!(meta.kind, "website");
    }
}
