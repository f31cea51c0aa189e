pub mod d400_profit_and_loss;
