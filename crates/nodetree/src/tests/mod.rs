mod property_builder;
