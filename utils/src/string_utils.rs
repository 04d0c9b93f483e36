use heck::ToSnakeCase;

pub fn to_snake_case(s: &str) -> String {
    s.to_snake_case()
}
