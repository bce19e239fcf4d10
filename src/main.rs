//! Capital Projection CLI
//!
//! Runs the financial projection for a project configuration and prints the
//! cash-flow table, profit waterfall and appraisal indicators

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use capital_projection::inputs::loader;
use capital_projection::{ProjectInputs, ProjectionEngine};

#[derive(Parser)]
#[command(name = "capital_projection", version, about = "Capital-project financial projection")]
struct Cli {
    /// Path to a project inputs JSON file (runs the built-in demo project
    /// when omitted)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Write the full cash-flow table to this CSV file
    #[arg(long)]
    csv_out: Option<PathBuf>,

    /// Print the indicator set as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let inputs = match &cli.input {
        Some(path) => loader::load_inputs(path)
            .with_context(|| format!("loading project inputs from {}", path.display()))?,
        None => ProjectInputs::demo_project(),
    };

    let horizon = inputs.horizon;
    let output = ProjectionEngine::new(inputs).run();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output.indicators)?);
    } else {
        println!("Capital Projection v{}", env!("CARGO_PKG_VERSION"));
        println!("======================\n");
        println!(
            "Horizon: {} construction + {} operation years",
            horizon.construction_years, horizon.operation_years
        );
        println!();

        println!("Cash-flow table:");
        println!(
            "{:>4} {:>5} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "Year", "Phase", "Inflow", "Outflow", "PreTaxCF", "CumPreTax", "PostTaxCF", "CumPostTax"
        );
        println!("{}", "-".repeat(90));
        for row in &output.cash_flow.years {
            let phase = match row.phase {
                capital_projection::projection::ProjectPhase::Construction => "Con",
                capital_projection::projection::ProjectPhase::Operation => "Op",
            };
            println!(
                "{:>4} {:>5} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
                row.year,
                phase,
                row.total_inflow,
                row.total_outflow,
                row.pre_tax_cash_flow,
                row.cumulative_pre_tax,
                row.post_tax_cash_flow,
                row.cumulative_post_tax,
            );
        }

        println!("\nProfit waterfall:");
        println!(
            "{:>4} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            "Year", "Revenue", "TotalCost", "Profit", "Taxable", "NetProfit", "EBITDA"
        );
        println!("{}", "-".repeat(90));
        for row in &output.waterfall.years {
            println!(
                "{:>4} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
                row.year,
                row.operating_revenue,
                row.total_cost,
                row.total_profit,
                row.taxable_income,
                row.net_profit,
                row.ebitda,
            );
        }

        let ind = &output.indicators;
        println!("\nIndicators:");
        println!(
            "  Pre-tax : IRR {:.2}%  NPV {:.2}  payback {:.2}y (dynamic {:.2}y)",
            ind.pre_tax.irr,
            ind.pre_tax.npv,
            ind.pre_tax.static_payback,
            ind.pre_tax.dynamic_payback,
        );
        println!(
            "  Post-tax: IRR {:.2}%  NPV {:.2}  payback {:.2}y (dynamic {:.2}y)",
            ind.post_tax.irr,
            ind.post_tax.npv,
            ind.post_tax.static_payback,
            ind.post_tax.dynamic_payback,
        );
    }

    if let Some(path) = &cli.csv_out {
        write_cash_flow_csv(path, &output)?;
        println!("\nFull cash-flow table written to: {}", path.display());
    }

    Ok(())
}

fn write_cash_flow_csv(
    path: &PathBuf,
    output: &capital_projection::ProjectionOutput,
) -> anyhow::Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("creating {}", path.display()))?;

    writeln!(
        file,
        "Year,Revenue,Subsidy,Residual,WCRecovery,Inflow,Construction,WorkingCapital,OperatingCost,VatSurcharges,Maintenance,Outflow,PreTaxCF,CumPreTax,AdjIncomeTax,PostTaxCF,CumPostTax,DiscPreTax,CumDiscPreTax,DiscPostTax,CumDiscPostTax"
    )?;

    for row in &output.cash_flow.years {
        writeln!(
            file,
            "{},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8}",
            row.year,
            row.operating_revenue,
            row.subsidy_income,
            row.residual_value,
            row.working_capital_recovery,
            row.total_inflow,
            row.construction_investment,
            row.working_capital,
            row.operating_cost,
            row.vat_and_surcharges,
            row.maintenance_investment,
            row.total_outflow,
            row.pre_tax_cash_flow,
            row.cumulative_pre_tax,
            row.adjusted_income_tax,
            row.post_tax_cash_flow,
            row.cumulative_post_tax,
            row.discounted_pre_tax,
            row.cumulative_discounted_pre_tax,
            row.discounted_post_tax,
            row.cumulative_discounted_post_tax,
        )?;
    }

    Ok(())
}
