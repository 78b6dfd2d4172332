mod block_builder_tests;
mod transaction_tests;
