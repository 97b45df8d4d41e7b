//! Performance benchmarks for rs-mdclean.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - Markdown-only cleaning of a synthetic page with header, TOC and footer
//! - Cleaning with HTML cross-validation
//! - Scaling over article length

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rs_mdclean::{clean_markdown, convert, Options};

fn paragraph(i: usize) -> String {
    format!(
        "Paragraph {i} walks through one more step of the setup, explaining what the \
         command does and what output to expect before moving on to the next part."
    )
}

/// Markdown with a navigation header, a TOC, `sections` article sections and
/// a three-section footer cascade.
fn sample_markdown(sections: usize) -> String {
    let mut md = String::new();
    for i in 0..14 {
        md.push_str(&format!("* [Menu item {i}](https://example.com/m{i})\n"));
    }
    md.push_str("\n# Sample Article Title\n\n## Contents\n");
    for i in 0..sections.min(12) {
        md.push_str(&format!("* [Part {i}](#part-{i})\n"));
    }
    for i in 0..sections {
        md.push_str(&format!("\n## Part {i}\n\n{}\n\n{}\n", paragraph(i), paragraph(i + 1)));
    }
    for title in ["Products", "Company", "Resources"] {
        md.push_str(&format!("\n## {title}\n"));
        for j in 0..8 {
            md.push_str(&format!("* [{title} {j}](https://example.com/{title}/{j})\n"));
        }
    }
    md
}

fn sample_html(sections: usize) -> String {
    let mut html = String::from("<html><head><title>Sample Article Title</title></head><body><nav>");
    for i in 0..14 {
        html.push_str(&format!("<a href=\"/m{i}\">Menu item {i}</a>"));
    }
    html.push_str("</nav><article><h1>Sample Article Title</h1>");
    for i in 0..sections {
        html.push_str(&format!(
            "<section><h2>Part {i}</h2><p>{}</p><p>{}</p></section>",
            paragraph(i),
            paragraph(i + 1)
        ));
    }
    html.push_str("</article><footer>");
    for title in ["Products", "Company", "Resources"] {
        html.push_str(&format!("<div><h2>{title}</h2><ul>"));
        for j in 0..8 {
            html.push_str(&format!("<li><a href=\"/{title}/{j}\">{title} {j}</a></li>"));
        }
        html.push_str("</ul></div>");
    }
    html.push_str("</footer></body></html>");
    html
}

fn bench_clean_markdown_only(c: &mut Criterion) {
    let md = sample_markdown(10);
    let options = Options::default();
    c.bench_function("clean_markdown_only", |b| {
        b.iter(|| clean_markdown(black_box(&md), "", black_box(&options)));
    });
}

fn bench_clean_cross_validated(c: &mut Criterion) {
    let md = sample_markdown(10);
    let html = sample_html(10);
    c.bench_function("clean_cross_validated", |b| {
        b.iter(|| convert(black_box(&html), black_box(&md)));
    });
}

fn bench_article_length(c: &mut Criterion) {
    let mut group = c.benchmark_group("article_length");
    for sections in [5, 50, 200] {
        let md = sample_markdown(sections);
        let html = sample_html(sections);
        group.throughput(Throughput::Bytes((md.len() + html.len()) as u64));
        group.bench_with_input(
            BenchmarkId::new("convert", format!("{sections} sections")),
            &(html, md),
            |b, (html, md)| {
                b.iter(|| convert(black_box(html), black_box(md)));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_clean_markdown_only,
    bench_clean_cross_validated,
    bench_article_length
);
criterion_main!(benches);
