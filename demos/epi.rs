//! An echo-planar imaging diagram: alternating readout train with phase
//! blips, built in a loop.
//!
//! Run with: `cargo run --example epi`

use std::sync::Arc;

use seqplot::{
    ChannelStore, Diagram, Layout, MarkerStyle, Rect, RowSelection, SeqPlotResult, SincPulse,
    StyleSheet, TimeGrid, Trapezoid,
};

fn main() -> SeqPlotResult<()> {
    let grid = Arc::new(TimeGrid::linspace(-0.2, 20.0, 10_000)?);
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

    let n_epi_steps = 8;
    let t_epi_start = 2.2;
    let dt_line = 1.6; // duration of one full readout gradient
    let dt_flat = 1.4; // duration of its flat top
    let dt_ramp_up = 0.5 * (dt_line - dt_flat);
    let dt_line0 = 0.8; // duration of the dephasing readout gradient
    let dt_flat0 = 0.6;
    let dt_ramp_up0 = 0.5 * (dt_line0 - dt_flat0);
    let t_start_block = t_epi_start + dt_line0;
    let dt_blip_bottom = dt_line - dt_flat;
    let dt_blip_top = 0.8 * dt_blip_bottom;
    let dt_blip_ramp = 0.5 * (dt_blip_bottom - dt_blip_top);

    // Readout: dephasing lobe first, then the alternating train.
    store.add_element(
        "Frequency",
        &Trapezoid {
            t_start: t_epi_start,
            t_flat_out: t_epi_start + dt_ramp_up0,
            t_ramp_down: t_epi_start + dt_ramp_up0 + dt_flat0,
        },
        -1.0,
    )?;
    for idx in 0..n_epi_steps {
        let ampl = if idx % 2 == 0 { 1.0 } else { -1.0 };
        let t_start = t_start_block + dt_line * idx as f64;
        store.add_element(
            "Frequency",
            &Trapezoid {
                t_start,
                t_flat_out: t_start + dt_ramp_up,
                t_ramp_down: t_start + dt_ramp_up + dt_flat,
            },
            ampl,
        )?;
    }

    // Phase: dephasing lobe, then one blip between every pair of readouts.
    store.add_element(
        "Phase",
        &Trapezoid {
            t_start: t_epi_start,
            t_flat_out: t_epi_start + dt_ramp_up0,
            t_ramp_down: t_epi_start + dt_ramp_up0 + dt_flat0,
        },
        -2.0,
    )?;
    for idx in 1..n_epi_steps {
        let t_start = t_start_block + dt_line * idx as f64 - 0.5 * dt_blip_bottom;
        store.add_element(
            "Phase",
            &Trapezoid {
                t_start,
                t_flat_out: t_start + dt_blip_ramp,
                t_ramp_down: t_start + dt_blip_ramp + dt_blip_top,
            },
            0.5,
        )?;
    }

    // One acquisition window per readout flat top.
    for idx in 0..n_epi_steps {
        let t_start = t_start_block + dt_line * idx as f64 + 0.5 * dt_blip_bottom;
        store.add_element(
            "ADC",
            &Rect {
                t_start,
                duration: dt_flat,
            },
            0.5,
        )?;
    }

    let layout = Layout::new()
        .row("RF/ADC", ["RF", "ADC"])
        .row("Phase\nEncoding", ["Phase"])
        .row("Slice\nSelection", ["Slice"])
        .row("Frequency\nEncoding", ["Frequency"]);

    let mut diagram = Diagram::compose(&layout, &store, StyleSheet::new())?;
    // Markers relating the dephasing block to the first readout.
    diagram.add_vline(
        RowSelection::All,
        t_epi_start,
        MarkerStyle {
            color: seqplot::Rgba::rgba(0, 0, 160, 0.5),
            ..MarkerStyle::default()
        },
    )?;
    diagram.add_vline(RowSelection::All, t_start_block, MarkerStyle::default())?;
    diagram.add_vline(
        RowSelection::All,
        t_start_block + dt_ramp_up + dt_flat,
        MarkerStyle::default(),
    )?;

    diagram.render_to_file("epi.png")?;
    println!("wrote epi.png");
    Ok(())
}
