//! Integration tests for ef-diagram: spec JSON in, output maps out.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use ef_core::BlockId;
use ef_diagram::{Diagram, DiagramError, DiagramSpec};

fn build(json: &str) -> Diagram {
    let spec: DiagramSpec = serde_json::from_str(json).unwrap();
    Diagram::from_spec(&spec).unwrap()
}

#[test]
fn greenhouse_light_logic() {
    // light sensor -> "less than" threshold -> relay, with a timer gate:
    // the grow light goes on when it is dark AND the timer is in its
    // on-phase.
    let mut diagram = build(
        r#"{
          "name": "grow light",
          "blocks": [
            { "id": 1, "name": "light", "type": "light", "sources": [],
              "input_count": 0, "input_type": null, "output_type": "n" },
            { "id": 2, "name": "threshold", "type": "number_entry", "sources": [],
              "input_count": 0, "value": "300", "input_type": "n", "output_type": "n" },
            { "id": 3, "name": "dark", "type": "less than", "sources": [1, 2],
              "input_count": 2, "input_type": "n", "output_type": "n" },
            { "id": 4, "name": "schedule", "type": "timer", "sources": [],
              "input_count": 0,
              "params": [ { "name": "seconds_on", "value": 3 },
                          { "name": "seconds_off", "value": 1 } ] },
            { "id": 5, "name": "lamp", "type": "and", "sources": [3, 4],
              "input_count": 2, "input_type": "n" }
          ]
        }"#,
    );

    // No sensor reading yet: the comparison and the lamp are starved even
    // though the timer runs.
    diagram.update();
    let out = diagram.outputs();
    assert_eq!(out[&BlockId::new(3)], None);
    assert_eq!(out[&BlockId::new(5)], None);
    assert_eq!(out[&BlockId::new(4)].as_deref(), Some("1"));

    // Dark reading in the timer's on-phase: lamp on.
    diagram.inject_literal(BlockId::new(1), "120.5").unwrap();
    diagram.update();
    let out = diagram.outputs();
    assert_eq!(out[&BlockId::new(3)].as_deref(), Some("1.0"));
    assert_eq!(out[&BlockId::new(5)].as_deref(), Some("1.0"));

    // Bright reading: lamp off regardless of the timer.
    diagram.inject_literal(BlockId::new(1), "900.0").unwrap();
    diagram.update();
    assert_eq!(diagram.outputs()[&BlockId::new(5)].as_deref(), Some("0.0"));
}

#[test]
fn output_precision_follows_input_precision() {
    let mut diagram = build(
        r#"{
          "name": "precision",
          "blocks": [
            { "id": 1, "name": "a", "type": "temperature", "sources": [],
              "input_count": 0, "input_type": null, "output_type": "n" },
            { "id": 2, "name": "b", "type": "temperature", "sources": [],
              "input_count": 0, "input_type": null, "output_type": "n" },
            { "id": 3, "name": "sum", "type": "plus", "sources": [1, 2],
              "input_count": 2, "input_type": "n", "output_type": "n" }
          ]
        }"#,
    );

    diagram.inject_literal(BlockId::new(1), "2.500").unwrap();
    diagram.inject_literal(BlockId::new(2), "1.25").unwrap();
    diagram.update();
    // Three places from "2.500" dominate two places from "1.25"
    assert_eq!(diagram.outputs()[&BlockId::new(3)].as_deref(), Some("3.750"));

    // Re-injecting at lower precision narrows the output
    diagram.inject_literal(BlockId::new(1), "2.5").unwrap();
    diagram.update();
    assert_eq!(diagram.outputs()[&BlockId::new(3)].as_deref(), Some("3.75"));
}

#[test]
fn near_zero_division_goes_null_without_aborting_the_pass() {
    let mut diagram = build(
        r#"{
          "name": "division",
          "blocks": [
            { "id": 1, "name": "n", "type": "number_entry", "sources": [],
              "input_count": 0, "value": "1", "input_type": "n", "output_type": "n" },
            { "id": 2, "name": "d", "type": "number_entry", "sources": [],
              "input_count": 0, "value": "0.0000000001", "input_type": "n", "output_type": "n" },
            { "id": 3, "name": "ratio", "type": "divided by", "sources": [1, 2],
              "input_count": 2, "input_type": "n", "output_type": "n" },
            { "id": 4, "name": "echo", "type": "absolute value", "sources": [1],
              "input_count": 1, "input_type": "n", "output_type": "n" }
          ]
        }"#,
    );

    diagram.update();
    let out = diagram.outputs();
    // The division degrades to null; the unrelated branch still computes.
    assert_eq!(out[&BlockId::new(3)], None);
    assert_eq!(out[&BlockId::new(4)].as_deref(), Some("1"));
}

#[test]
fn moving_average_acceptance_sequence() {
    let mut diagram = build(
        r#"{
          "name": "smoothing",
          "blocks": [
            { "id": 1, "name": "sensor", "type": "temperature", "sources": [],
              "input_count": 0, "input_type": null, "output_type": "n" },
            { "id": 2, "name": "smooth", "type": "simple moving average",
              "sources": [1], "input_count": 1,
              "params": [ { "name": "period", "value": 10 } ],
              "input_type": "n", "output_type": "n" }
          ]
        }"#,
    );

    let readings = [
        "12.44", "17.1", "11.15", "12.38", "13.22", "16.87", "16.14", "14.22", "13.08", "10.27",
    ];
    for reading in readings {
        diagram.inject_literal(BlockId::new(1), reading).unwrap();
        diagram.update();
    }
    // The raw mean is 13.687; the block stores it rounded to its source
    // precision, two places here, and renders it the same way.
    let smooth = diagram.find_by_id(BlockId::new(2)).unwrap();
    assert_eq!(smooth.value, Some(ef_core::Value::Number(13.69)));
    assert_eq!(diagram.outputs()[&BlockId::new(2)].as_deref(), Some("13.69"));
}

#[test]
fn unrecognized_type_passes_through() {
    let mut diagram = build(
        r#"{
          "name": "fallback",
          "blocks": [
            { "id": 1, "name": "n", "type": "number_entry", "sources": [],
              "input_count": 0, "value": "7.25", "input_type": "n", "output_type": "n" },
            { "id": 2, "name": "mystery", "type": "data storage", "sources": [1],
              "input_count": 1, "input_type": "n", "output_type": "n" }
          ]
        }"#,
    );
    diagram.update();
    assert_eq!(diagram.outputs()[&BlockId::new(2)].as_deref(), Some("7.25"));
}

#[test]
fn unrecognized_type_forwards_image_payloads() {
    // A storage block between a camera and nothing: the payload must pass
    // through untouched, not get dropped by the numeric projection.
    let mut diagram = build(
        r#"{
          "name": "archive",
          "blocks": [
            { "id": 1, "name": "camera", "type": "camera", "sources": [],
              "input_count": 0, "input_type": null, "output_type": "i" },
            { "id": 2, "name": "store", "type": "data storage", "sources": [1],
              "input_count": 1, "input_type": "i", "output_type": "i" }
          ]
        }"#,
    );
    diagram.inject_image(BlockId::new(1), "opaquepayload").unwrap();
    diagram.update();
    assert_eq!(
        diagram.outputs()[&BlockId::new(2)].as_deref(),
        Some("opaquepayload")
    );
}

#[test]
fn unresolved_source_reference_is_fatal() {
    let spec: DiagramSpec = serde_json::from_str(
        r#"{
          "name": "broken",
          "blocks": [
            { "id": 1, "name": "orphan", "type": "not", "sources": [42],
              "input_count": 1, "input_type": "n", "output_type": "n" }
          ]
        }"#,
    )
    .unwrap();
    let err = Diagram::from_spec(&spec).unwrap_err();
    assert_eq!(
        err,
        DiagramError::UnresolvedSource {
            block: BlockId::new(1),
            source_id: BlockId::new(42),
        }
    );
}

#[test]
fn image_blur_pipeline() {
    use image::{DynamicImage, Rgb, RgbImage};
    use std::io::Cursor;

    // Encode a tiny camera frame as the injection payload.
    let frame = RgbImage::from_pixel(6, 6, Rgb([10, 200, 60]));
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(frame)
        .write_to(&mut buffer, image::ImageFormat::Png)
        .unwrap();
    let payload = BASE64.encode(buffer.into_inner());

    let mut diagram = build(
        r#"{
          "name": "camera",
          "blocks": [
            { "id": 1, "name": "camera", "type": "camera", "sources": [],
              "input_count": 0, "input_type": null, "output_type": "i" },
            { "id": 2, "name": "soften", "type": "blur", "sources": [1],
              "input_count": 1,
              "params": [ { "name": "blur_amount", "value": 2 } ],
              "input_type": "i", "output_type": "i" }
          ]
        }"#,
    );

    diagram.inject_image(BlockId::new(1), payload).unwrap();
    diagram.update();
    let out = diagram.outputs();
    let blurred = out[&BlockId::new(2)].as_ref().unwrap();
    // Output decodes back to an image of the same size
    let bytes = BASE64.decode(blurred).unwrap();
    let img = image::load_from_memory(&bytes).unwrap();
    assert_eq!((img.width(), img.height()), (6, 6));

    // Garbage payload: the block goes null on that tick, nothing panics.
    diagram.inject_image(BlockId::new(1), "!!not-base64!!").unwrap();
    diagram.update();
    assert_eq!(diagram.outputs()[&BlockId::new(2)], None);
}
