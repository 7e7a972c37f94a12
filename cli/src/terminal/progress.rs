use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Turns `span` into a progress bar counting up to `total` probes.
pub fn attach(span: &Span, total: usize) -> anyhow::Result<()> {
    let style = ProgressStyle::with_template(
        "{spinner:.blue} {msg} [{bar:32.green/bright_black}] {pos}/{len} ({eta})",
    )?
    .tick_strings(TICKS)
    .progress_chars("━╸ ");

    span.pb_set_style(&style);
    span.pb_set_length(total as u64);
    span.pb_set_message("probing");
    Ok(())
}

pub fn advance(span: &Span) {
    span.pb_inc(1);
}
