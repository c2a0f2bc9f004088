mod test_logging_pipeline;
