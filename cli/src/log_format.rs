//! Plain-text event format with the span path and a trace id per line.
//!
//! `TIMESTAMP LEVEL trace_id=N tool_loop{strategy="json"}: target: fields`
//!
//! `trace_id` is the id of the outermost span, so every line of one run shares it.
//! Events outside any span have neither the id nor the path.

use std::fmt;

use tracing_core::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::{FmtContext, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

#[derive(Default)]
pub struct SpanPathFormat {
    timer: SystemTime,
}

impl SpanPathFormat {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, N> FormatEvent<S, N> for SpanPathFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        self.timer.format_time(&mut writer)?;
        write!(writer, " {}", event.metadata().level())?;

        if let Some(scope) = ctx.event_scope() {
            let mut spans = scope.from_root().peekable();
            if let Some(root) = spans.peek() {
                write!(writer, " trace_id={}", root.id().into_u64())?;
            }
            write!(writer, " ")?;
            for span in spans {
                write!(writer, "{}", span.name())?;
                let ext = span.extensions();
                if let Some(fields) = ext.get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{}}}", fields)?;
                    }
                }
                write!(writer, ":")?;
            }
        }

        write!(writer, " {}: ", event.metadata().target())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
