use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub rank: String,
    pub title: String,
    #[serde(rename = "image")]
    pub image_url: Url,
}

impl Movie {
    /// 把 `rank` 解析成評分；無法解析、負數或非有限值一律視為 0
    pub fn rating(&self) -> f32 {
        self.rank
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|r| r.is_finite() && *r >= 0.0)
            .unwrap_or(0.0)
    }

    /// 海報縮圖網址：取第一個 `._` 之前的部分再接上尺寸後綴
    pub fn resized_image_url(&self, width: u32) -> Url {
        let base = self
            .image_url
            .as_str()
            .split("._")
            .next()
            .unwrap_or_default();

        Url::parse(&format!("{}._V0_UX{}_.jpg", base, width))
            .unwrap_or_else(|_| self.image_url.clone())
    }
}

/// Top 250 清單回應
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostPopularMovies {
    #[serde(default)]
    pub error_message: Option<String>,
    pub items: Vec<Movie>,
}

impl MostPopularMovies {
    /// 伺服器端回報的錯誤訊息，空字串視為沒有錯誤
    pub fn rejection(&self) -> Option<&str> {
        self.error_message.as_deref().filter(|m| !m.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailerResponse {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl TrailerResponse {
    pub fn rejection(&self) -> Option<&str> {
        self.error_message.as_deref().filter(|m| !m.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    pub image: Vec<u8>,
    pub text: String,
    pub correct_answer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    GreaterThan,
    LessThan,
}

impl Comparison {
    pub fn holds(self, rating: f32, threshold: u8) -> bool {
        let threshold = f32::from(threshold);
        match self {
            Comparison::GreaterThan => rating > threshold,
            Comparison::LessThan => rating < threshold,
        }
    }

    pub fn phrase(self) -> &'static str {
        match self {
            Comparison::GreaterThan => "greater than",
            Comparison::LessThan => "less than",
        }
    }
}

pub fn compose_question(
    movie: &Movie,
    image: Vec<u8>,
    threshold: u8,
    comparison: Comparison,
) -> QuizQuestion {
    QuizQuestion {
        image,
        text: format!(
            "Is the rating of this movie {} {}?",
            comparison.phrase(),
            threshold
        ),
        correct_answer: comparison.holds(movie.rating(), threshold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(rank: &str) -> Movie {
        Movie {
            id: "tt0111161".to_string(),
            rank: rank.to_string(),
            title: "The Shawshank Redemption".to_string(),
            image_url: Url::parse(
                "https://m.media-amazon.com/images/M/MV5BMDFkYTc0MGEt._V1_Ratio0.6716_AL_.jpg",
            )
            .unwrap(),
        }
    }

    #[test]
    fn test_rating_parses_rank() {
        assert_eq!(movie("9.2").rating(), 9.2);
        assert_eq!(movie(" 7 ").rating(), 7.0);
    }

    #[test]
    fn test_rating_falls_back_to_zero() {
        assert_eq!(movie("").rating(), 0.0);
        assert_eq!(movie("N/A").rating(), 0.0);
        assert_eq!(movie("-3").rating(), 0.0);
        assert_eq!(movie("inf").rating(), 0.0);
        assert_eq!(movie("NaN").rating(), 0.0);
    }

    #[test]
    fn test_resized_image_url() {
        let url = movie("9.2").resized_image_url(600);
        assert_eq!(
            url.as_str(),
            "https://m.media-amazon.com/images/M/MV5BMDFkYTc0MGEt._V0_UX600_.jpg"
        );
    }

    #[test]
    fn test_resized_image_url_without_marker() {
        let mut m = movie("9.2");
        m.image_url = Url::parse("https://example.com/poster").unwrap();
        assert_eq!(
            m.resized_image_url(300).as_str(),
            "https://example.com/poster._V0_UX300_.jpg"
        );
    }

    #[test]
    fn test_greater_than_branch() {
        let question = compose_question(&movie("9.0"), vec![1, 2, 3], 6, Comparison::GreaterThan);
        assert!(question.correct_answer);
        assert_eq!(question.text, "Is the rating of this movie greater than 6?");
        assert_eq!(question.image, vec![1, 2, 3]);

        let question = compose_question(&movie("5.0"), vec![], 6, Comparison::GreaterThan);
        assert!(!question.correct_answer);
    }

    #[test]
    fn test_less_than_branch() {
        let question = compose_question(&movie("5.0"), vec![], 7, Comparison::LessThan);
        assert!(question.correct_answer);
        assert_eq!(question.text, "Is the rating of this movie less than 7?");

        let question = compose_question(&movie("8.1"), vec![], 7, Comparison::LessThan);
        assert!(!question.correct_answer);
    }

    #[test]
    fn test_equal_rating_is_false_both_ways() {
        assert!(!Comparison::GreaterThan.holds(8.0, 8));
        assert!(!Comparison::LessThan.holds(8.0, 8));
    }

    #[test]
    fn test_catalog_rejection() {
        let catalog: MostPopularMovies = serde_json::from_value(serde_json::json!({
            "errorMessage": "",
            "items": []
        }))
        .unwrap();
        assert_eq!(catalog.rejection(), None);

        let catalog: MostPopularMovies = serde_json::from_value(serde_json::json!({
            "items": []
        }))
        .unwrap();
        assert_eq!(catalog.rejection(), None);

        let catalog: MostPopularMovies = serde_json::from_value(serde_json::json!({
            "errorMessage": "Maximum usage",
            "items": []
        }))
        .unwrap();
        assert_eq!(catalog.rejection(), Some("Maximum usage"));
    }
}
