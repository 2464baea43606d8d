use serde_json::json;

use ui::analytics::{Analytics, RecordingSink};
use ui::core::dom::{Dom, MemoryDom, NodeId};
use ui::core::timing::ManualScheduler;
use ui::results::{ChartDatum, ChartSettings, ResultChartRenderer, VideoResults};

type Controller = VideoResults<RecordingSink, MemoryDom, ManualScheduler>;

fn controller(dom: &MemoryDom, scheduler: &ManualScheduler, sink: &RecordingSink) -> Controller {
    VideoResults::new(
        "intro",
        vec![ChartDatum::new("Faster", 40.0), ChartDatum::new("Cheaper", 25.0)],
        ChartSettings::default(),
        Analytics::new(sink.clone()),
        ResultChartRenderer::new(dom.clone(), scheduler.clone()),
    )
}

/// `<body><video id="intro"/><footer/></body>`
fn page_with_video() -> (MemoryDom, NodeId, NodeId) {
    let dom = MemoryDom::new();
    let video = dom.create_element("video").unwrap();
    dom.set_attribute(&video, "id", "intro");
    let footer = dom.create_element("footer").unwrap();
    dom.append_child(&dom.body(), &video);
    dom.append_child(&dom.body(), &footer);
    (dom, video, footer)
}

#[test]
fn attach_without_video_does_nothing() {
    let dom = MemoryDom::new();
    let sink = RecordingSink::new();
    let mut results = controller(&dom, &ManualScheduler::new(), &sink);

    assert!(!results.attach());
    assert!(sink.events().is_empty());
    assert!(dom.children(dom.body()).is_empty());
}

#[test]
fn attach_creates_a_hidden_container_after_the_video() {
    let (dom, video, footer) = page_with_video();
    let sink = RecordingSink::new();
    let mut results = controller(&dom, &ManualScheduler::new(), &sink);

    assert!(results.attach());

    let container = dom.element_by_id("intro-results").unwrap();
    assert_eq!(dom.children(dom.body()), vec![video, container, footer]);
    assert_eq!(dom.attribute(container, "class").as_deref(), Some("video-results-container"));
    assert_eq!(dom.style(container, "opacity").as_deref(), Some("0"));
    assert_eq!(dom.style(container, "height").as_deref(), Some("0"));
    assert_eq!(dom.style(container, "overflow").as_deref(), Some("hidden"));
    assert_eq!(dom.style(container, "transition").as_deref(), Some("all 1.5s ease-out"));

    let loads = sink.named("video_load");
    assert_eq!(loads.len(), 1);
    assert_eq!(loads[0].str_prop("video_name"), Some("intro"));
    assert_eq!(loads[0].properties["video_progress"], json!(0));
}

#[test]
fn attach_reuses_an_existing_container() {
    let (dom, _video, _footer) = page_with_video();
    let existing = dom.element_with_class("div", "custom").unwrap();
    dom.set_attribute(&existing, "id", "intro-results");
    dom.append_child(&dom.body(), &existing);

    let mut results = controller(&dom, &ManualScheduler::new(), &RecordingSink::new());
    assert!(results.attach());
    assert!(results.attach());

    assert_eq!(dom.children(dom.body()).len(), 3);
    assert_eq!(dom.element_by_id("intro-results"), Some(existing));
    assert_eq!(dom.style(existing, "height").as_deref(), Some("0"));
}

#[test]
fn milestones_are_reported_once_each() {
    let (dom, _, _) = page_with_video();
    let sink = RecordingSink::new();
    let mut results = controller(&dom, &ManualScheduler::new(), &sink);
    results.attach();

    for progress in [10, 25, 25, 26, 50, 50, 74, 75, 75, 90] {
        results.on_time_update(progress);
    }

    let reported: Vec<_> = sink
        .named("video_progress")
        .iter()
        .map(|event| event.properties["video_progress"].clone())
        .collect();
    assert_eq!(reported, vec![json!(25), json!(50), json!(75)]);
}

#[test]
fn reattaching_rearms_milestones() {
    let (dom, _, _) = page_with_video();
    let sink = RecordingSink::new();
    let mut results = controller(&dom, &ManualScheduler::new(), &sink);

    results.attach();
    results.on_time_update(25);
    results.attach();
    results.on_time_update(25);

    assert_eq!(sink.named("video_progress").len(), 2);
}

#[test]
fn play_and_pause_carry_the_current_progress() {
    let (dom, _, _) = page_with_video();
    let sink = RecordingSink::new();
    let results = controller(&dom, &ManualScheduler::new(), &sink);

    results.on_play(0);
    results.on_pause(37);

    let names: Vec<_> = sink.events().into_iter().map(|event| event.name).collect();
    assert_eq!(names, vec!["video_play", "video_pause"]);
    assert_eq!(sink.named("video_pause")[0].properties["video_progress"], json!(37));
}

#[test]
fn ending_reports_completion_and_reveals_results() {
    let (dom, _, _) = page_with_video();
    let scheduler = ManualScheduler::new();
    let sink = RecordingSink::new();
    let mut results = controller(&dom, &scheduler, &sink);
    results.attach();

    assert!(results.on_ended());

    let complete = sink.named("video_complete");
    assert_eq!(complete.len(), 1);
    assert_eq!(complete[0].properties["video_progress"], json!(100));

    let container = dom.element_by_id("intro-results").unwrap();
    assert_eq!(dom.style(container, "opacity").as_deref(), Some("1"));
    assert_eq!(dom.style(container, "height").as_deref(), Some("auto"));

    scheduler.advance(1000.0);
    let bars = dom.find_by_class(container, "bar");
    assert_eq!(dom.style(bars[0], "width").as_deref(), Some("40%"));
    assert_eq!(dom.style(bars[1], "width").as_deref(), Some("25%"));
}

#[test]
fn ending_without_a_container_only_reports() {
    let (dom, _, _) = page_with_video();
    let sink = RecordingSink::new();
    let mut results = controller(&dom, &ManualScheduler::new(), &sink);

    assert!(!results.on_ended());
    assert_eq!(sink.named("video_complete").len(), 1);
    assert!(dom.element_by_id("intro-results").is_none());
}
