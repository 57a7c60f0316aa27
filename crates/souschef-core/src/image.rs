//! Food-photo URL templating.
//!
//! No image bytes are fetched here: the resolver only derives a URL
//! pointing at a public image-generation endpoint. Load failures are the
//! renderer's problem, not an application error.

const IMAGE_BASE: &str = "https://image.pollinations.ai/prompt/";

const IMAGE_WIDTH: u32 = 800;
const IMAGE_HEIGHT: u32 = 600;
const IMAGE_MODEL: &str = "flux";

/// Derive the photo URL for a dish, with the dish name URL-encoded into
/// the prompt path and fixed rendering parameters.
pub fn dish_image_url(dish_name: &str) -> String {
    let mut url = reqwest::Url::parse(IMAGE_BASE).expect("image base URL is valid");

    url.path_segments_mut()
        .expect("image base URL has a path")
        .pop_if_empty()
        .push(&format!("{} food photography", dish_name));

    url.query_pairs_mut()
        .append_pair("width", &IMAGE_WIDTH.to_string())
        .append_pair("height", &IMAGE_HEIGHT.to_string())
        .append_pair("model", IMAGE_MODEL)
        .append_pair("nologo", "true");

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_contains_encoded_dish_name() {
        let url = dish_image_url("Shakshuka with Feta");
        assert!(url.contains("Shakshuka%20with%20Feta"));
        assert!(url.starts_with("https://image.pollinations.ai/prompt/"));
    }

    #[test]
    fn test_url_carries_fixed_parameters() {
        let url = dish_image_url("Pasta");
        assert!(url.contains("width=800"));
        assert!(url.contains("height=600"));
        assert!(url.contains("model=flux"));
        assert!(url.contains("nologo=true"));
    }

    #[test]
    fn test_non_ascii_dish_name_is_encoded() {
        let url = dish_image_url("חביתה");
        // No raw Hebrew left in the URL once encoded.
        assert!(!url.contains("חביתה"));
        assert!(url.contains('%'));
    }
}
