pub mod a001_unit;
pub mod a002_payment_method;
pub mod a003_transaction_category;
pub mod a004_customer;
pub mod a005_supplier;
pub mod a006_employee;
pub mod a007_product;
pub mod a008_sale;
pub mod a009_purchase;
pub mod a010_money_transaction;
pub mod a011_bom;
pub mod a012_stock_usage;
