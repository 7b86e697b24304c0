pub mod export;
pub mod formatter;
pub mod plot;

pub use export::{export_headers, export_plot_data, export_ranking, export_rows, ExportFormat, ExportRow};
pub use formatter::{
    format_entry_detail, format_ranking_table, format_score, format_source_legend, format_tsv,
    should_use_colors,
};
pub use plot::{marker_size, plot_series, PlotPoint, PlotSeries};
