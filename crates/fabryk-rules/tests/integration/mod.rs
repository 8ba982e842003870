mod compile;
mod nested;
mod variants;
