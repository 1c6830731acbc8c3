//! Full runs through the public API: JSON export to report.

use std::sync::Arc;

use figsona::config::OutputFormat;
use figsona::types::NodeKind;
use figsona::{AnalysisPipeline, AnalysisReport, DesignFile, StaticSource};

const KEY: &str = "e2eTestKey0123456789AB";

fn text_child(i: usize) -> serde_json::Value {
    serde_json::json!({
        "id": format!("1:{}", i + 2),
        "name": format!("Label {}", i),
        "type": "TEXT",
        "fills": [{ "type": "SOLID", "color": { "r": 1.0, "g": 0.0, "b": 0.0, "a": 1.0 } }],
        "style": { "fontFamily": "Inter", "fontSize": 16 }
    })
}

fn screen_json() -> String {
    let children: Vec<_> = (0..15).map(text_child).collect();
    serde_json::json!({
        "name": "Landing",
        "version": "42",
        "thumbnailUrl": null,
        "document": {
            "id": "1:1",
            "name": "Hero",
            "type": "FRAME",
            "children": children
        }
    })
    .to_string()
}

fn pipeline_for(file: DesignFile) -> AnalysisPipeline {
    AnalysisPipeline::new(Arc::new(StaticSource::new().with_file(KEY, file)))
}

#[tokio::test]
async fn frame_with_fifteen_red_labels() {
    let file = DesignFile::from_json_str(&screen_json()).unwrap();
    let report = pipeline_for(file).run(KEY).await.unwrap();
    let stats = &report.stats;

    assert_eq!(stats.total_layers, 16);
    assert_eq!(stats.max_depth, 1);
    assert_eq!(stats.colors, vec!["rgb(255, 0, 0)".to_string()]);
    assert_eq!(stats.typography.len(), 1);
    assert_eq!(stats.typography.get("Inter 16px"), Some(&15));
    assert_eq!(stats.layer_count(&NodeKind::Text), 15);
    assert_eq!(stats.layer_count(&NodeKind::Frame), 1);

    assert_eq!(stats.complex_frames.len(), 1);
    assert_eq!(stats.complex_frames[0].name, "Hero");
    assert_eq!(stats.complex_frames[0].child_count, 15);

    let harmony = &report.personality.color_analysis.harmony;
    assert!(harmony.is_monochromatic);
    assert_eq!(harmony.sample_size, 1);

    assert_eq!(report.file.file_name.as_deref(), Some("Landing"));
    assert!(report.file.has_children);
}

#[tokio::test]
async fn same_input_same_output() {
    let first = pipeline_for(DesignFile::from_json_str(&screen_json()).unwrap())
        .run(KEY)
        .await
        .unwrap();
    let second = pipeline_for(DesignFile::from_json_str(&screen_json()).unwrap())
        .run(KEY)
        .await
        .unwrap();

    assert_eq!(
        serde_json::to_string(&first.stats).unwrap(),
        serde_json::to_string(&second.stats).unwrap()
    );
    assert_eq!(first.personality, second.personality);
}

#[tokio::test]
async fn json_report_survives_reload() {
    let file = DesignFile::from_json_str(&screen_json()).unwrap();
    let report = pipeline_for(file).run(KEY).await.unwrap();

    let json = report.render(OutputFormat::Json).unwrap();
    assert!(json.contains("\"totalLayers\": 16"));
    assert!(json.contains("\"primaryArchetype\""));

    let reloaded = AnalysisReport::from_json(&json).unwrap();
    assert_eq!(reloaded, report);
}

#[tokio::test]
async fn bare_node_export() {
    let node = serde_json::json!({
        "type": "CANVAS",
        "name": "Page 1",
        "children": null
    })
    .to_string();
    let file = DesignFile::from_json_str(&node).unwrap();
    let report = pipeline_for(file).run(KEY).await.unwrap();

    assert_eq!(report.stats.total_layers, 1);
    assert_eq!(report.stats.max_depth, 0);
    assert!(report.stats.colors.is_empty());
    assert!(!report.file.has_children);
}
