use std::path::PathBuf;
use std::sync::Mutex;

use geo::Coord;

use crate::config::ImageryConfig;
use crate::imagery::{FetchOutcome, ImageRequest, ImageryError, ImageryProvider, harvest};
use crate::sample::{Sample, Side};

/// Records every request, answering from a fixed script.
struct Scripted {
    requests: Mutex<Vec<ImageRequest>>,
    answer: fn(usize) -> Result<FetchOutcome, ImageryError>,
}

impl Scripted {
    fn new(answer: fn(usize) -> Result<FetchOutcome, ImageryError>) -> Self {
        Scripted {
            requests: Mutex::new(vec![]),
            answer,
        }
    }

    fn requests(&self) -> Vec<ImageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ImageryProvider for Scripted {
    fn fetch(&self, request: &ImageRequest) -> Result<FetchOutcome, ImageryError> {
        let mut requests = self.requests.lock().unwrap();
        let index = requests.len();
        requests.push(request.clone());

        match (self.answer)(index) {
            Ok(FetchOutcome::Saved(_)) => Ok(FetchOutcome::Saved(
                request.output_directory.join(format!("{}.jpg", request.name)),
            )),
            other => other,
        }
    }
}

fn samples() -> Vec<Sample> {
    let origin = Coord {
        x: -117.112604,
        y: 32.699876,
    };
    let next = Coord {
        x: -117.113581,
        y: 32.699864,
    };

    vec![
        Sample::new(origin, 269.4, Side::Right, 0.0),
        Sample::new(origin, 269.4, Side::Left, 0.0),
        Sample::new(next, 270.1, Side::Right, 10.0),
        Sample::new(next, 270.1, Side::Left, 10.0),
    ]
}

fn config() -> ImageryConfig {
    ImageryConfig::new("secret", "imagery")
}

#[test]
fn request_carries_sample() {
    let sample = samples()[0];
    let request = ImageRequest::new(&sample, &config()).expect("request must form");

    assert_eq!(request.longitude, sample.longitude);
    assert_eq!(request.latitude, sample.latitude);
    assert_eq!(request.bearing, sample.bearing);
    assert_eq!(request.api_key, "secret");
    assert_eq!(request.output_directory, PathBuf::from("imagery"));
    assert!(request.name.ends_with("_359"), "got {}", request.name);
}

#[test]
fn request_names_are_unique_per_direction() {
    let samples = samples();
    let right = ImageRequest::new(&samples[0], &config()).expect("right");
    let left = ImageRequest::new(&samples[1], &config()).expect("left");

    assert_ne!(right.name, left.name);
    assert_eq!(right.name.split('_').next(), left.name.split('_').next());
}

#[test]
fn api_key_is_never_serialized() {
    let request = ImageRequest::new(&samples()[0], &config()).expect("request must form");
    let json = serde_json::to_string(&request).expect("request must serialize");

    assert!(!json.contains("secret"));
    assert!(json.contains("bearing"));
}

#[test]
fn harvests_in_sample_order() {
    let provider = Scripted::new(|_| Ok(FetchOutcome::Saved(PathBuf::new())));
    let samples = samples();

    let report = harvest(&samples, &provider, &config());

    assert!(report.is_complete());
    assert_eq!(report.saved.len(), samples.len());

    let requested = provider
        .requests()
        .iter()
        .map(|request| request.bearing)
        .collect::<Vec<_>>();
    let expected = samples.iter().map(|sample| sample.bearing).collect::<Vec<_>>();
    assert_eq!(requested, expected);
}

#[test]
fn missing_panorama_is_skipped() {
    let provider = Scripted::new(|index| match index {
        1 => Ok(FetchOutcome::NoPanorama),
        _ => Ok(FetchOutcome::Saved(PathBuf::new())),
    });

    let report = harvest(&samples(), &provider, &config());

    assert!(report.is_complete());
    assert_eq!(report.skipped, vec![1]);
    assert_eq!(report.saved.len(), 3);
    assert_eq!(report.attempted(), 4);
}

#[test_log::test]
fn failures_do_not_abort() {
    let provider = Scripted::new(|index| match index {
        0 | 2 => Err(ImageryError::Provider("quota exceeded".to_string())),
        _ => Ok(FetchOutcome::Saved(PathBuf::new())),
    });

    let report = harvest(&samples(), &provider, &config());

    assert!(!report.is_complete());
    assert_eq!(
        report.failed.iter().map(|(index, _)| *index).collect::<Vec<_>>(),
        vec![0, 2]
    );
    assert_eq!(report.saved.len(), 2);
    assert_eq!(provider.requests().len(), 4);
}

#[test]
fn empty_harvest() {
    let provider = Scripted::new(|_| Ok(FetchOutcome::NoPanorama));
    let report = harvest(&[], &provider, &config());

    assert_eq!(report.attempted(), 0);
    assert!(provider.requests().is_empty());
}
