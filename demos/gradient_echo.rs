//! A basic gradient-echo sequence diagram with a phase-encode sweep,
//! vertical markers and an echo-time bracket.
//!
//! Run with: `cargo run --example gradient_echo`

use std::sync::Arc;

use seqplot::{
    Amplitude, ChannelStore, ChannelStyle, Diagram, Layout, MarkerStyle, Rect, Rgba,
    RowSelection, SeqPlotResult, SincPulse, StyleSheet, TimeGrid, Trapezoid,
};

fn main() -> SeqPlotResult<()> {
    let grid = Arc::new(TimeGrid::linspace(-0.2, 4.5, 10_000)?);
    let mut store = ChannelStore::new(Arc::clone(&grid));
    for name in ["RF", "ADC", "Phase", "Slice", "Frequency"] {
        store.create(name, Arc::clone(&grid))?;
    }

    store.add_element(
        "RF",
        &SincPulse {
            t_start: 0.2,
            duration: 0.8,
            side_lobes: 2,
        },
        1.0,
    )?;
    store.add_element(
        "ADC",
        &Rect {
            t_start: 2.2,
            duration: 1.6,
        },
        1.0,
    )?;

    // Slice selection with its rephasing lobe.
    store.add_element(
        "Slice",
        &Trapezoid {
            t_start: 0.0,
            t_flat_out: 0.2,
            t_ramp_down: 1.0,
        },
        1.0,
    )?;
    store.add_element(
        "Slice",
        &Trapezoid {
            t_start: 1.2,
            t_flat_out: 1.4,
            t_ramp_down: 1.8,
        },
        -1.0,
    )?;

    // Ten phase-encode steps overlaid on a single channel.
    store.add_element(
        "Phase",
        &Trapezoid {
            t_start: 1.2,
            t_flat_out: 1.4,
            t_ramp_down: 1.8,
        },
        Amplitude::sweep(-1.0, 1.0, 10),
    )?;

    // Readout dephasing and the readout gradient itself.
    store.add_element(
        "Frequency",
        &Trapezoid {
            t_start: 1.2,
            t_flat_out: 1.4,
            t_ramp_down: 1.8,
        },
        -1.0,
    )?;
    store.add_element(
        "Frequency",
        &Trapezoid {
            t_start: 2.0,
            t_flat_out: 2.2,
            t_ramp_down: 3.8,
        },
        0.5,
    )?;

    let layout = Layout::new()
        .row("RF/ADC", ["RF", "ADC"])
        .row("Phase\nEncoding", ["Phase"])
        .row("Slice\nSelection", ["Slice"])
        .row("Frequency\nEncoding", ["Frequency"]);

    let style = StyleSheet::new()
        .with_channel(
            "RF",
            ChannelStyle {
                color: Rgba::rgb(0, 0, 160),
                fill: Rgba::rgba(0, 0, 160, 0.2),
                ..ChannelStyle::default()
            },
        )
        .with_channel(
            "ADC",
            ChannelStyle {
                color: Rgba::rgb(160, 80, 0),
                fill: Rgba::rgba(160, 80, 0, 0.2),
                ..ChannelStyle::default()
            },
        );

    let mut diagram = Diagram::compose(&layout, &store, style)?;
    diagram.add_vline(RowSelection::All, 0.6, MarkerStyle::default())?;
    diagram.add_vline(RowSelection::All, 3.0, MarkerStyle::default())?;
    diagram.add_label("RF/ADC", 0.6, -0.6, "90° Excitation Pulse")?;
    diagram.add_label("RF/ADC", 3.0, 0.3, "Data Sampling")?;
    diagram.add_interval("RF/ADC", (0.6, 3.0), 1.4, Some("Echo-Time (TE)"))?;

    diagram.render_to_file("gradient_echo.png")?;
    println!("wrote gradient_echo.png");
    Ok(())
}
