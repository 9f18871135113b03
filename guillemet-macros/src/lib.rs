use std::fs;
use std::path::Path;

use guillemet_parser::{Segment, parse};
use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Ident, LitStr, Token, parse::Parse, parse::ParseStream, parse_macro_input};
use walkdir::WalkDir;

/// File extension picked up by `directory!`
const TEMPLATE_EXTENSION: &str = "tpl";

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    let mut prev_upper = false;
    for (i, c) in s.chars().enumerate() {
        let upper = c.is_uppercase();
        if upper {
            if i > 0 && !prev_upper && !result.ends_with('_') {
                result.push('_');
            }
            for lc in c.to_lowercase() {
                result.push(lc);
            }
        } else {
            result.push(c);
        }
        prev_upper = upper;
    }
    result
}

fn accessor_ident(name: &str, span: Span) -> syn::Result<Ident> {
    let snake = to_snake_case(&name.replace(['-', '.', ' '], "_"));
    syn::parse_str::<Ident>(&snake)
        .map(|mut ident| {
            ident.set_span(span);
            ident
        })
        .map_err(|_| syn::Error::new(span, format!("`{}` is not a valid template name", name)))
}

fn segment_tokens(segment: &Segment) -> proc_macro2::TokenStream {
    match segment {
        Segment::Literal(text) => quote! {
            ::guillemet::Segment::Literal(::std::string::String::from(#text))
        },
        Segment::Placeholder(name) => quote! {
            ::guillemet::Segment::Placeholder(::std::string::String::from(#name))
        },
    }
}

fn generate_code_for_content(
    name: &str,
    content: &str,
    path_for_include: Option<&str>,
    span: Span,
) -> syn::Result<proc_macro2::TokenStream> {
    let fn_name = accessor_ident(name, span)?;
    let template = parse(content);
    let segments = template.iter().map(segment_tokens);

    let include_bytes_stmt = if let Some(path_str) = path_for_include {
        quote! {
            // ensure the compiler is aware the output is linked to the source so that any changes
            // to the template file will trigger a recompilation
            const _: &[u8] = include_bytes!(#path_str);
        }
    } else {
        quote! {}
    };

    Ok(quote! {
        pub fn #fn_name() -> &'static ::guillemet::ExpansionPlan {
            #include_bytes_stmt

            static PLAN: ::std::sync::LazyLock<::guillemet::ExpansionPlan> =
                ::std::sync::LazyLock::new(|| {
                    ::guillemet::ExpansionPlan::new(::guillemet::ParsedTemplate::from_segments([
                        #(#segments),*
                    ]))
                });
            &PLAN
        }
    })
}

fn generate_code_for_file(path: &Path, span: Span) -> syn::Result<proc_macro2::TokenStream> {
    let file_stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| syn::Error::new(span, format!("No file name in {:?}", path)))?;
    let path_str = path.to_string_lossy();
    let content = fs::read_to_string(path)
        .map_err(|err| syn::Error::new(span, format!("Failed to read {:?}: {}", path, err)))?;
    generate_code_for_content(&file_stem, &content, Some(&path_str), span)
}

fn manifest_path(lit: &LitStr) -> syn::Result<std::path::PathBuf> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map_err(|_| syn::Error::new(lit.span(), "CARGO_MANIFEST_DIR not set"))?;
    Ok(Path::new(&manifest_dir).join(lit.value()))
}

struct StrInput {
    name: LitStr,
    content: LitStr,
}

impl Parse for StrInput {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: LitStr = input.parse()?;
        input.parse::<Token![,]>()?;
        let content: LitStr = input.parse()?;
        input.parse::<Option<Token![,]>>()?;
        Ok(StrInput { name, content })
    }
}

fn expand_directory(dir_lit: &LitStr) -> syn::Result<proc_macro2::TokenStream> {
    let root_path = manifest_path(dir_lit)?;
    if !root_path.is_dir() {
        return Err(syn::Error::new(
            dir_lit.span(),
            format!("Directory not found: {:?}", root_path),
        ));
    }

    let mut functions = Vec::new();
    for entry in WalkDir::new(&root_path).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            syn::Error::new(dir_lit.span(), format!("Failed to read {:?}: {}", root_path, err))
        })?;

        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == TEMPLATE_EXTENSION) {
            functions.push(generate_code_for_file(path, dir_lit.span())?);
        }
    }

    Ok(quote! {
        #(#functions)*
    })
}

fn expand_file(file_lit: &LitStr) -> syn::Result<proc_macro2::TokenStream> {
    let path = manifest_path(file_lit)?;
    if !path.is_file() {
        return Err(syn::Error::new(
            file_lit.span(),
            format!("File not found: {:?}", path),
        ));
    }
    generate_code_for_file(&path, file_lit.span())
}

/// Generates one accessor per `*.tpl` file found under a directory
///
/// The path is relative to the crate's `Cargo.toml`. Each accessor is named after the file stem
/// in snake case and returns a `&'static guillemet::ExpansionPlan`.
#[proc_macro]
pub fn guillemet_directory(input: TokenStream) -> TokenStream {
    let dir_lit = parse_macro_input!(input as LitStr);
    expand_directory(&dir_lit)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Generates an accessor for a single template file
#[proc_macro]
pub fn guillemet_file(input: TokenStream) -> TokenStream {
    let file_lit = parse_macro_input!(input as LitStr);
    expand_file(&file_lit)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Generates an accessor for inline template text: `str!("name", "Hello «Name»!")`
#[proc_macro]
pub fn guillemet_str(input: TokenStream) -> TokenStream {
    let StrInput { name, content } = parse_macro_input!(input as StrInput);
    generate_code_for_content(&name.value(), &content.value(), None, name.span())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
