mod report;

pub use report::ProfitAndLossReport;
