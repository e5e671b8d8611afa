use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr, Result};

struct ContainerArgs {
    name: Option<LitStr>,
}

impl ContainerArgs {
    fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut args = ContainerArgs { name: None };
        for attr in attrs {
            if !attr.path().is_ident("members") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    args.name = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown members attribute key, expected `name`"))
                }
            })?;
        }
        Ok(args)
    }
}

#[derive(Default)]
struct FieldArgs {
    rename: Option<LitStr>,
    readonly: bool,
    skip: bool,
}

impl FieldArgs {
    fn from_attrs(attrs: &[Attribute]) -> Result<Self> {
        let mut args = FieldArgs::default();
        for attr in attrs {
            if !attr.path().is_ident("member") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    args.rename = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("readonly") {
                    args.readonly = true;
                } else if meta.path.is_ident("skip") {
                    args.skip = true;
                } else {
                    return Err(meta.error(
                        "unknown member attribute key, expected `rename`, `readonly` or `skip`",
                    ));
                }
                Ok(())
            })?;
        }
        Ok(args)
    }
}

struct Member {
    ident: Ident,
    name: String,
    writable: bool,
}

pub fn expand(input: &DeriveInput) -> Result<TokenStream> {
    let ident = &input.ident;
    let container = ContainerArgs::from_attrs(&input.attrs)?;
    let type_name = container
        .name
        .map(|lit| lit.value())
        .unwrap_or_else(|| ident.to_string());

    let members = collect_members(&input.data)?;
    let count = members.len();

    let descriptors = members.iter().map(|m| {
        let name = &m.name;
        let writable = m.writable;
        quote! { ::delta_types::MemberDescriptor::new(#name, #writable) }
    });

    let get_arms = members.iter().map(|m| {
        let name = &m.name;
        let field = &m.ident;
        quote! { #name => ::delta_types::to_member_value(&self.#field), }
    });

    let set_arms = members.iter().map(|m| {
        let name = &m.name;
        let field = &m.ident;
        if m.writable {
            quote! {
                #name => {
                    self.#field = ::delta_types::from_member_value(value)?;
                    ::core::result::Result::Ok(())
                }
            }
        } else {
            quote! { #name => ::core::result::Result::Err(::delta_types::SetError::ReadOnly), }
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::delta_types::Members for #ident #ty_generics #where_clause {
            fn type_descriptor() -> &'static ::delta_types::TypeDescriptor {
                static MEMBERS: [::delta_types::MemberDescriptor; #count] = [#(#descriptors),*];
                static DESCRIPTOR: ::delta_types::TypeDescriptor =
                    ::delta_types::TypeDescriptor::from_static(#type_name, &MEMBERS);
                &DESCRIPTOR
            }
        }

        impl #impl_generics ::delta_types::MemberAccessor for #ident #ty_generics #where_clause {
            fn descriptor(&self) -> &::delta_types::TypeDescriptor {
                <Self as ::delta_types::Members>::type_descriptor()
            }

            fn try_get(&self, member: &str) -> ::core::option::Option<::delta_types::MemberValue> {
                match member {
                    #(#get_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn try_set(
                &mut self,
                member: &str,
                value: ::delta_types::MemberValue,
            ) -> ::core::result::Result<(), ::delta_types::SetError> {
                match member {
                    #(#set_arms)*
                    _ => ::core::result::Result::Err(::delta_types::SetError::UnknownMember),
                }
            }
        }
    })
}

fn collect_members(data: &Data) -> Result<Vec<Member>> {
    let fields = match data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new(
                    Span::call_site(),
                    "Members derive only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                Span::call_site(),
                "Members derive only supports structs with named fields",
            ))
        }
    };

    let mut members: Vec<Member> = Vec::with_capacity(fields.len());
    for field in fields {
        let args = FieldArgs::from_attrs(&field.attrs)?;
        if args.skip {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let (name, span) = match &args.rename {
            Some(lit) => (lit.value(), lit.span()),
            None => (ident.to_string().trim_start_matches("r#").to_string(), ident.span()),
        };
        if name.is_empty() {
            return Err(syn::Error::new(span, "member name must not be empty"));
        }
        if members.iter().any(|m| m.name == name) {
            return Err(syn::Error::new(
                span,
                format!("duplicate member name `{name}`"),
            ));
        }
        members.push(Member {
            ident,
            name,
            writable: !args.readonly,
        });
    }
    Ok(members)
}
