//! Content Client Integration Tests
//!
//! Drives every operation against a scripted backend and checks what goes
//! over the seam: prompt content, image attachment, schema constraints, and
//! how replies are decoded or rejected.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sabor_scout::backend::{BackendError, GenerateRequest, GenerativeBackend, InlineImage};
use sabor_scout::content::{ContentClient, ContentError, ContentRequest, ContentResult, Identification};
use sabor_scout::domain::{AnalysisKind, Beer, MarketingBrief, RecipeTarget};
use serde_json::json;

/// Backend that replays a script and records every request it sees.
#[derive(Clone, Default)]
struct FakeBackend {
    script: Arc<Mutex<VecDeque<Result<String, BackendError>>>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl FakeBackend {
    fn replying(text: impl Into<String>) -> Self {
        let backend = Self::default();
        backend.script.lock().unwrap().push_back(Ok(text.into()));
        backend
    }

    fn failing(error: BackendError) -> Self {
        let backend = Self::default();
        backend.script.lock().unwrap().push_back(Err(error));
        backend
    }

    fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn only_request(&self) -> GenerateRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one backend call");
        requests.into_iter().next().unwrap()
    }
}

#[async_trait]
impl GenerativeBackend for FakeBackend {
    async fn generate(&self, request: GenerateRequest) -> Result<String, BackendError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left")
    }
}

fn beer_reply() -> String {
    json!({
        "name": "Hoppy Trail IPA",
        "brewery": "Acme Brewing",
        "style": "IPA",
        "abv": 6.5,
        "ibu": 60.0,
        "tastingNotes": ["citrus", "pine"],
        "description": "Bright and bitter."
    })
    .to_string()
}

#[tokio::test]
async fn test_identify_attaches_image_and_schema() {
    let backend = FakeBackend::replying(beer_reply());
    let client = ContentClient::new(backend.clone());

    let result = client.identify(InlineImage::jpeg(b"label bytes")).await.unwrap();

    match result {
        Identification::Recognized(beer) => {
            assert_eq!(beer.name, "Hoppy Trail IPA");
            assert_eq!(beer.ibu, Some(60.0));
            assert_eq!(beer.tasting_notes, vec!["citrus", "pine"]);
        }
        Identification::Unknown => panic!("expected a recognized beer"),
    }

    let request = backend.only_request();
    assert!(request.prompt.contains("Analyze the beer label"));
    assert_eq!(request.image.unwrap().mime_type, "image/jpeg");

    // The declared shape uses the uppercase type dialect
    let schema = serde_json::to_value(request.response_schema.unwrap()).unwrap();
    assert_eq!(schema["type"], "OBJECT");
    assert_eq!(schema["properties"]["tastingNotes"]["type"], "ARRAY");
    assert_eq!(schema["properties"]["ibu"]["nullable"], true);
}

#[tokio::test]
async fn test_identify_sentinel_name_means_unknown() {
    let reply = json!({
        "name": "Unknown Beer",
        "brewery": "",
        "style": "",
        "abv": 0.0,
        "tastingNotes": [],
        "description": ""
    })
    .to_string();

    let backend = FakeBackend::replying(reply);
    let client = ContentClient::new(backend);

    let result = client.identify(InlineImage::jpeg(b"blurry")).await.unwrap();
    assert_eq!(result, Identification::Unknown);
}

#[tokio::test]
async fn test_search_decodes_the_beers_envelope() {
    let reply = json!({ "beers": [serde_json::from_str::<Beer>(&beer_reply()).unwrap()] });
    let backend = FakeBackend::replying(reply.to_string());
    let client = ContentClient::new(backend.clone());

    let beers = client.search("hazy IPA").await.unwrap();
    assert_eq!(beers.len(), 1);
    assert_eq!(beers[0].brewery, "Acme Brewing");

    let request = backend.only_request();
    assert!(request.prompt.contains("\"hazy IPA\""));
    assert!(request.image.is_none());
    assert!(request.response_schema.is_some());
}

#[tokio::test]
async fn test_search_rejects_a_blank_query() {
    let backend = FakeBackend::default();
    let client = ContentClient::new(backend.clone());

    let err = client.search("   ").await.unwrap_err();
    assert!(matches!(err, ContentError::Precondition(_)));

    // Nothing went over the wire
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_pairings_prompt_carries_the_beer() {
    let reply = json!({ "pairings": ["Fish tacos", "Aged cheddar", "Carnitas"] });
    let backend = FakeBackend::replying(reply.to_string());
    let client = ContentClient::new(backend.clone());

    let beer: Beer = serde_json::from_str(&beer_reply()).unwrap();
    let pairings = client.food_pairings(&beer).await.unwrap();
    assert_eq!(pairings.len(), 3);

    let request = backend.only_request();
    assert!(request.prompt.contains("Hoppy Trail IPA"));
    assert!(request.prompt.contains("Acme Brewing"));
    assert!(request.prompt.contains("citrus, pine"));
}

#[tokio::test]
async fn test_education_is_free_form_prose() {
    let backend = FakeBackend::replying("## IPA\nHop-forward ale.");
    let client = ContentClient::new(backend.clone());

    let lesson = client.education("IPA").await.unwrap();
    assert_eq!(lesson, "## IPA\nHop-forward ale.");

    // Prose operations carry no schema constraint
    let request = backend.only_request();
    assert!(request.response_schema.is_none());
    assert!(request.image.is_none());
}

#[tokio::test]
async fn test_blank_location_returns_no_events_without_a_call() {
    let backend = FakeBackend::default();
    let client = ContentClient::new(backend.clone());

    let events = client.local_events("  ").await.unwrap();
    assert!(events.is_empty());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn test_events_decode_with_and_without_urls() {
    let reply = json!({
        "events": [
            {
                "name": "Hop Harvest Fest",
                "date": "Next Saturday",
                "location": "Riverside Park",
                "description": "Fresh-hop pours from twelve breweries.",
                "url": "https://example.com/fest"
            },
            {
                "name": "Cask Night",
                "date": "Every Thursday",
                "location": "The Barrel Room",
                "description": "One-off casks on gravity.",
                "url": null
            }
        ]
    });

    let backend = FakeBackend::replying(reply.to_string());
    let client = ContentClient::new(backend);

    let events = client.local_events("Portland").await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].url.as_deref(), Some("https://example.com/fest"));
    assert!(events[1].url.is_none());
}

#[tokio::test]
async fn test_recipe_prompt_formats_whole_numbers_bare() {
    let reply = json!({
        "recipeName": "Galaxy Quest",
        "maltBill": ["10 lb 2-row"],
        "hopSchedule": ["1 oz Galaxy @ 10 min"],
        "yeast": "US-05",
        "instructions": "Mash at 152F for 60 minutes."
    });

    let backend = FakeBackend::replying(reply.to_string());
    let client = ContentClient::new(backend.clone());

    let target = RecipeTarget {
        style: "Hazy IPA".to_string(),
        abv: 6.0,
        ibu: 45.0,
        flavor_profile: "tropical, soft".to_string(),
    };
    let recipe = client.optimize_recipe(&target).await.unwrap();
    assert_eq!(recipe.recipe_name, "Galaxy Quest");

    // 6.0 renders as "6", matching how the targets read in a prompt
    let request = backend.only_request();
    assert!(request.prompt.contains("target ABV of 6%"));
    assert!(request.prompt.contains("IBU of 45,"));
    assert!(request.prompt.contains("\"tropical, soft\""));
}

#[tokio::test]
async fn test_quality_prompt_follows_the_analysis_kind() {
    let backend = FakeBackend::replying("## Report\nLooks **clear**.");
    let client = ContentClient::new(backend.clone());

    let report = client
        .quality_report(InlineImage::jpeg(b"sample"), AnalysisKind::Turbidity)
        .await
        .unwrap();
    assert!(report.contains("**clear**"));

    let request = backend.only_request();
    assert!(request.prompt.contains("turbidity and clarity"));
    assert!(request.image.is_some());
    assert!(request.response_schema.is_none());

    let backend = FakeBackend::replying("## Report\nSediment present.");
    let client = ContentClient::new(backend.clone());
    client
        .quality_report(InlineImage::jpeg(b"sample"), AnalysisKind::VisualDefects)
        .await
        .unwrap();
    assert!(backend.only_request().prompt.contains("visual defects"));
}

#[tokio::test]
async fn test_marketing_brief_is_spelled_out() {
    let backend = FakeBackend::replying("**Crisp.** A beer for the bold.");
    let client = ContentClient::new(backend.clone());

    let brief = MarketingBrief {
        beer_name: "Hoppy Trail IPA".to_string(),
        style: "IPA".to_string(),
        tasting_notes: "citrus, pine".to_string(),
        target_audience: "weekend hikers".to_string(),
    };
    let copy = client.marketing_copy(&brief).await.unwrap();
    assert!(copy.contains("for the bold"));

    let request = backend.only_request();
    assert!(request.prompt.contains("- Name: Hoppy Trail IPA"));
    assert!(request.prompt.contains("- Target Audience: weekend hikers"));
    assert!(request.response_schema.is_none());
}

#[tokio::test]
async fn test_reply_not_matching_the_shape_is_a_shape_error() {
    let backend = FakeBackend::replying("Sorry, I cannot help with that.");
    let client = ContentClient::new(backend);

    let err = client.search("stout").await.unwrap_err();
    assert!(matches!(err, ContentError::Shape(_)));
}

#[tokio::test]
async fn test_backend_failures_pass_through() {
    let backend = FakeBackend::failing(BackendError::Status {
        status: 429,
        message: "quota exceeded".to_string(),
    });
    let client = ContentClient::new(backend);

    let err = client.education("lager").await.unwrap_err();
    match err {
        ContentError::Backend(BackendError::Status { status, .. }) => assert_eq!(status, 429),
        other => panic!("expected a backend status error, got {}", other),
    }
}

#[tokio::test]
async fn test_execute_tags_results_by_operation() {
    let reply = json!({ "beers": [serde_json::from_str::<Beer>(&beer_reply()).unwrap()] });
    let backend = FakeBackend::replying(reply.to_string());
    let client = ContentClient::new(backend);

    let result = client
        .execute(ContentRequest::Search {
            query: "porter".to_string(),
        })
        .await
        .unwrap();
    match result {
        ContentResult::Beers(beers) => assert_eq!(beers.len(), 1),
        other => panic!("expected beers, got {:?}", other),
    }

    let backend = FakeBackend::replying("## Porters\nDark and roasty.");
    let client = ContentClient::new(backend);

    let result = client
        .execute(ContentRequest::Education {
            topic: "porters".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(
        result,
        ContentResult::Text("## Porters\nDark and roasty.".to_string())
    );
}

#[tokio::test]
async fn test_contribution_is_validated_locally() {
    let backend = FakeBackend::default();
    let client = ContentClient::new(backend.clone());

    let image = InlineImage::jpeg(b"label");

    // Blank identity fields are rejected
    let err = client
        .submit_contribution(&Beer::new("  ", "Acme Brewing"), &image)
        .await
        .unwrap_err();
    assert!(matches!(err, ContentError::Precondition(_)));

    // A missing image is rejected
    let empty = InlineImage::new("image/jpeg", "");
    let err = client
        .submit_contribution(&Beer::new("Hoppy Trail IPA", "Acme Brewing"), &empty)
        .await
        .unwrap_err();
    assert!(matches!(err, ContentError::Precondition(_)));

    // A complete contribution is accepted without a backend call
    client
        .submit_contribution(&Beer::new("Hoppy Trail IPA", "Acme Brewing"), &image)
        .await
        .unwrap();
    assert!(backend.requests().is_empty());
}
