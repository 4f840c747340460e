use proc_macro::TokenStream;
use quote::quote;
use syn::{ItemFn, ReturnType, parse_macro_input};

/// Logs a traced primitive at debug level:
/// `[syscall] <= name(arg = ..)` on entry and `[syscall] => name(..) = result` on return.
///
/// Arguments are rendered with `Debug`; `self` receivers and destructuring
/// patterns are skipped. The calling crate must depend on `log`.
#[proc_macro_attribute]
pub fn syscall_trace(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut function = parse_macro_input!(item as ItemFn);
    let signature = &function.sig;
    let fn_name = &signature.ident;
    let arg_names: Vec<_> = signature
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            syn::FnArg::Typed(pat_type) => match &*pat_type.pat {
                syn::Pat::Ident(pat_ident) => Some(pat_ident.ident.clone()),
                _ => None,
            },
            syn::FnArg::Receiver(_) => None,
        })
        .collect();
    let ret_ty = match &signature.output {
        ReturnType::Default => quote! { () },
        ReturnType::Type(_, ty) => quote! { #ty },
    };

    let arg_list_pattern = arg_names
        .iter()
        .map(|name| format!("{} = {{:?}}", name))
        .collect::<Vec<_>>()
        .join(", ");
    let format_pattern_in = format!("[syscall] <= {}({})", fn_name, arg_list_pattern);
    let format_pattern_out = format!("[syscall] => {}(..) = {{:?}}", fn_name);

    let fn_body = &function.block;
    function.block = Box::new(syn::parse_quote! {{
        ::log::debug!(#format_pattern_in #(, #arg_names)*);

        #[allow(clippy::redundant_closure_call)]
        let __result = (|| -> #ret_ty #fn_body)();

        ::log::debug!(#format_pattern_out, __result);
        __result
    }});
    quote! {
        #function
    }
    .into()
}
