use approx::assert_abs_diff_eq;
use roadside_fixtures::{
    ANTIMERIDIAN, ANTIMERIDIAN_SRID, LA_JOLLA, LA_JOLLA_SRID, MERIDIAN, MERIDIAN_SRID, SAN_DIEGO,
    SAN_DIEGO_SRID,
};
use roadside_geo::{GeoError, Srid, normalize};

use crate::error::Error;
use crate::path::Path;
use crate::sample::{SampleError, Sampler, Side, sample_road, sample_roads};

fn road(wkt: &str) -> Path {
    Path::from_wkt(Srid::WGS84, wkt).expect("fixture must parse")
}

/// The length of a road measured through `srid`.
fn projected_length(road: &Path, srid: u32) -> f64 {
    road.reproject(Srid(srid))
        .expect("fixture must project")
        .length()
}

/// Smallest angle between two bearings, in degrees.
fn angular_difference(a: f64, b: f64) -> f64 {
    let difference = normalize(a - b);
    difference.min(360.0 - difference)
}

#[test_log::test]
fn san_diego_street() {
    let road = road(SAN_DIEGO);
    let samples = sample_road(&road, Srid(SAN_DIEGO_SRID), 10.0).expect("road must sample");

    // Roughly 187m of road, one pair every 10m.
    assert_eq!(samples.len() % 2, 0);
    let pairs = samples.len() / 2;
    assert!((17..=19).contains(&pairs), "got {pairs} pairs");

    let first = road.first();
    assert_abs_diff_eq!(samples[0].longitude, first.x, epsilon = 1e-6);
    assert_abs_diff_eq!(samples[0].latitude, first.y, epsilon = 1e-6);
}

#[test]
fn pairs_look_either_side() {
    let samples = sample_road(&road(SAN_DIEGO), Srid(SAN_DIEGO_SRID), 10.0).expect("road must sample");

    for pair in samples.chunks(2) {
        let (right, left) = (pair[0], pair[1]);

        assert_eq!(right.side, Side::Right);
        assert_eq!(left.side, Side::Left);
        assert_eq!(right.position(), left.position());
        assert_eq!(right.heading, left.heading);

        assert_abs_diff_eq!(right.bearing, normalize(right.heading + 90.0), epsilon = 1e-9);
        assert_abs_diff_eq!(left.bearing, normalize(left.heading - 90.0), epsilon = 1e-9);
        assert_abs_diff_eq!(angular_difference(right.bearing, left.bearing), 180.0, epsilon = 1e-9);

        for sample in pair {
            assert!((0.0..360.0).contains(&sample.bearing), "{}", sample.bearing);
        }

        // The street runs west.
        assert!(angular_difference(right.heading, 270.0) < 5.0);
    }
}

#[test]
fn samples_are_an_interval_apart() {
    let samples = sample_road(&road(LA_JOLLA), Srid(LA_JOLLA_SRID), 25.0).expect("road must sample");

    for (step, pair) in samples.chunks(2).enumerate() {
        assert_abs_diff_eq!(pair[0].distance, step as f64 * 25.0, epsilon = 1e-6);
    }
}

#[test]
fn straight_road_count() {
    let road = road(MERIDIAN);
    let length = projected_length(&road, MERIDIAN_SRID);

    // Not a multiple of the interval, so every whole interval is one pair.
    let interval = 7.0;
    assert!(length % interval > 0.5);

    let samples = sample_road(&road, Srid(MERIDIAN_SRID), interval).expect("road must sample");
    assert_eq!(samples.len(), 2 * (length / interval).floor() as usize);

    for pair in samples.chunks(2) {
        assert!(angular_difference(pair[0].heading, 0.0) < 1e-6);
        assert_abs_diff_eq!(pair[0].bearing, 90.0, epsilon = 1e-6);
        assert_abs_diff_eq!(pair[1].bearing, 270.0, epsilon = 1e-6);
        assert_abs_diff_eq!(pair[0].longitude, 3.0, epsilon = 1e-9);
    }

    // Moving north along the meridian.
    assert!(samples.windows(2).all(|w| w[0].latitude <= w[1].latitude));
}

#[test]
fn short_road_is_empty() {
    let road = road(SAN_DIEGO);
    let length = projected_length(&road, SAN_DIEGO_SRID);

    let samples = sample_road(&road, Srid(SAN_DIEGO_SRID), length + 1.0).expect("road must sample");
    assert!(samples.is_empty());
}

#[test]
fn no_sample_for_final_stretch() {
    let road = road(SAN_DIEGO);
    let length = projected_length(&road, SAN_DIEGO_SRID);

    // One whole interval, with a little left over.
    let interval = length * 0.6;
    let samples = sample_road(&road, Srid(SAN_DIEGO_SRID), interval).expect("road must sample");

    assert_eq!(samples.len(), 2);
    assert_eq!(samples[0].distance, 0.0);
}

#[test]
fn sampling_is_deterministic() {
    let road = road(LA_JOLLA);
    let sampler = Sampler::new(Srid(LA_JOLLA_SRID), 10.0).expect("sampler must build");

    let first = sampler.sample(&road).expect("road must sample");
    let second = sampler.sample(&road).expect("road must sample");
    assert_eq!(first, second);
}

#[test]
fn samples_are_lazy_and_restartable() {
    let road = road(LA_JOLLA);
    let sampler = Sampler::new(Srid(LA_JOLLA_SRID), 10.0).expect("sampler must build");
    let all = sampler.sample(&road).expect("road must sample");

    let head = sampler
        .samples(&road)
        .expect("road must project")
        .take(3)
        .collect::<Result<Vec<_>, _>>()
        .expect("head must sample");
    assert_eq!(head.as_slice(), &all[..3]);

    let again = sampler
        .samples(&road)
        .expect("road must project")
        .collect::<Result<Vec<_>, _>>()
        .expect("road must sample");
    assert_eq!(again, all);
}

#[test]
fn crosses_the_antimeridian() {
    let road = road(ANTIMERIDIAN);
    let length = projected_length(&road, ANTIMERIDIAN_SRID);
    let samples = sample_road(&road, Srid(ANTIMERIDIAN_SRID), 10.0).expect("road must sample");

    assert_eq!(samples.len(), 2 * (length / 10.0).floor() as usize);
    assert!(samples.iter().any(|sample| sample.longitude > 179.0));
    assert!(samples.iter().any(|sample| sample.longitude < -179.0));

    for sample in &samples {
        assert!((-180.0..=180.0).contains(&sample.longitude));
        assert!(angular_difference(sample.heading, 90.0) < 2.0, "{}", sample.heading);
    }
}

#[test]
fn rejects_bad_intervals() {
    for interval in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let result = sample_road(&road(SAN_DIEGO), Srid(SAN_DIEGO_SRID), interval);
        assert!(
            matches!(result, Err(Error::Sample(SampleError::InvalidInterval(_)))),
            "{interval} must be rejected"
        );
    }
}

#[test]
fn rejects_geographic_measurement() {
    let result = sample_road(&road(SAN_DIEGO), Srid::WGS84, 10.0);
    assert!(matches!(
        result,
        Err(Error::Geo(GeoError::InvalidReferenceSystem(Srid::WGS84)))
    ));
}

#[test]
fn rejects_unknown_systems() {
    let result = sample_road(&road(SAN_DIEGO), Srid(99999), 10.0);
    assert!(matches!(
        result,
        Err(Error::Geo(GeoError::InvalidReferenceSystem(Srid(99999))))
    ));
}

#[test]
fn rejects_projected_roads() {
    let projected = road(SAN_DIEGO)
        .reproject(Srid(SAN_DIEGO_SRID))
        .expect("fixture must project");

    let result = sample_road(&projected, Srid(SAN_DIEGO_SRID), 10.0);
    assert!(matches!(result, Err(Error::Geo(GeoError::InvalidReferenceSystem(_)))));
}

#[test]
fn rejects_roads_outside_the_zone() {
    // Far beyond the width of zone 11.
    let tokyo = road("LINESTRING (139.6917 35.6895, 139.6927 35.6905)");

    let result = sample_road(&tokyo, Srid(SAN_DIEGO_SRID), 10.0);
    assert!(matches!(result, Err(Error::Path(_)) | Err(Error::Geo(_))));
}

#[test]
fn batches_are_independent() {
    let outside = road("LINESTRING (139.6917 35.6895, 139.6927 35.6905)");
    let roads = vec![road(SAN_DIEGO), outside, road(LA_JOLLA)];

    let results = sample_roads(&roads, Srid(SAN_DIEGO_SRID), 10.0);
    assert_eq!(results.len(), 3);

    let san_diego = results[0].as_ref().expect("san diego must sample");
    assert_eq!(
        san_diego,
        &sample_road(&roads[0], Srid(SAN_DIEGO_SRID), 10.0).expect("road must sample")
    );

    assert!(results[1].is_err());
    assert!(results[2].is_ok());
}
