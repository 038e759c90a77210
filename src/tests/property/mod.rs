mod fence_props;
mod prompt_props;
