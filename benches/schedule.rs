// benches/schedule.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use uver_sync::core::csv::Table;
use uver_sync::specs::schedule::ScheduleParser;
use uver_sync::specs::survey::{to_responses, SurveyTarget};
use uver_sync::models::VenueType;

const CATEGORIES: [&str; 5] = ["LIVE", "TOUR", "RELEASE", "TV", "RADIO"];

/// A listing page shaped like the official one, `n` entries long.
fn synth_page(n: usize) -> String {
    let mut html = String::from("<html><body><div class=\"schedule-list\"><ul>");
    for i in 0..n {
        let month = i % 12 + 1;
        let day = i % 28 + 1;
        let cat = CATEGORIES[i % CATEGORIES.len()];
        html.push_str(&format!(
            "<li class=\"schedule-item\"><p class=\"date\">2026.{month:02}.{day:02} <span>[SAT]</span></p>\
             <a href=\"/schedule/{i}\">{cat} UVERworld 公演 #{i} (会場 {i})</a></li>\n"
        ));
    }
    html.push_str("</ul></div></body></html>");
    html
}

fn synth_survey(n: usize) -> String {
    let mut csv = String::from("曲名,項目2,年齢,都道府県名,性別\n");
    for i in 0..n {
        csv.push_str(&format!("IMPACT,{}回目,{},東京都,女性\n", i % 30 + 1, 15 + i % 60));
    }
    csv
}

fn bench_schedule(c: &mut Criterion) {
    let parser = ScheduleParser::new().expect("patterns compile");
    let small = synth_page(50);
    let large = synth_page(1000);

    c.bench_function("schedule_parse_50", |b| {
        b.iter(|| black_box(parser.parse(black_box(&small)).len()))
    });
    c.bench_function("schedule_parse_1000", |b| {
        b.iter(|| black_box(parser.parse(black_box(&large)).len()))
    });
}

fn bench_survey(c: &mut Criterion) {
    let text = synth_survey(5000);
    let target = SurveyTarget {
        live_name: "ARENA TOUR".into(),
        event_date: chrono::NaiveDate::from_ymd_opt(2026, 2, 13).expect("valid date"),
        venue: VenueType::Arena,
    };

    c.bench_function("survey_reshape_5000", |b| {
        b.iter(|| {
            let table = Table::from_text(black_box(&text), ',').expect("csv parses");
            black_box(to_responses(&table, &target).map(|r| r.len()))
        })
    });
}

criterion_group!(benches, bench_schedule, bench_survey);
criterion_main!(benches);
