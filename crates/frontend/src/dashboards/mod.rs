pub mod d400_profit_and_loss;

pub use d400_profit_and_loss::ui::ProfitAndLossReport;
