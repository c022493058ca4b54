//! HTML文档处理模块
//!
//! 提供HTML解析、DOM遍历、属性读写和序列化功能

// 标准库导入
use std::collections::VecDeque;

// 第三方crate导入
use anyhow::Result;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::Attribute;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// 解析HTML文本为DOM树
pub fn parse_html(html_content: &str) -> Result<RcDom> {
    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut html_content.as_bytes())
        .map_err(|e| anyhow::anyhow!("HTML解析失败: {:?}", e))
}

/// 收集DOM中满足条件的所有元素节点
pub fn collect_elements<F>(dom: &RcDom, predicate: F) -> Vec<Handle>
where
    F: Fn(&str, &[Attribute]) -> bool,
{
    let mut matched = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(dom.document.clone());

    while let Some(node) = queue.pop_front() {
        if let NodeData::Element { ref name, ref attrs, .. } = node.data {
            if predicate(name.local.as_ref(), &attrs.borrow()) {
                matched.push(node.clone());
            }
        }

        for child in node.children.borrow().iter() {
            queue.push_back(child.clone());
        }
    }

    matched
}

/// 按文档顺序查找第一个指定标签名的元素
pub fn find_first_element(dom: &RcDom, tag_name: &str) -> Option<Handle> {
    // 深度优先保证与文档顺序一致
    let mut stack = vec![dom.document.clone()];

    while let Some(node) = stack.pop() {
        if let NodeData::Element { ref name, .. } = node.data {
            if name.local.as_ref() == tag_name {
                return Some(node.clone());
            }
        }

        for child in node.children.borrow().iter().rev() {
            stack.push(child.clone());
        }
    }

    None
}

/// 读取元素的属性值
pub fn get_attribute(handle: &Handle, attr_name: &str) -> Option<String> {
    if let NodeData::Element { ref attrs, .. } = handle.data {
        attrs
            .borrow()
            .iter()
            .find(|attr| attr.name.local.as_ref() == attr_name)
            .map(|attr| attr.value.to_string())
    } else {
        None
    }
}

/// 重写元素的属性值（属性不存在时不做任何修改）
pub fn set_attribute(handle: &Handle, attr_name: &str, new_value: &str) {
    if let NodeData::Element { ref attrs, .. } = handle.data {
        for attr in attrs.borrow_mut().iter_mut() {
            if attr.name.local.as_ref() == attr_name {
                attr.value = new_value.into();
            }
        }
    }
}

/// 判断属性值是否包含指定的空白分隔标记（忽略大小写）
/// 用于匹配`rel="stylesheet"`这类多值属性
pub fn attribute_contains_token(attrs: &[Attribute], attr_name: &str, token: &str) -> bool {
    attrs
        .iter()
        .find(|attr| attr.name.local.as_ref() == attr_name)
        .map(|attr| {
            attr.value
                .split_whitespace()
                .any(|t| t.eq_ignore_ascii_case(token))
        })
        .unwrap_or(false)
}

/// 读取元素的全部文本内容
pub fn element_text(handle: &Handle) -> String {
    let mut text = String::new();
    for child in handle.children.borrow().iter() {
        if let NodeData::Text { ref contents } = child.data {
            text.push_str(&contents.borrow());
        }
    }
    text
}

/// 重写元素的文本内容
/// 新文本写入第一个文本子节点，其余文本子节点清空；调用方保证元素已有文本子节点
pub fn set_element_text(handle: &Handle, new_text: &str) {
    let mut first_text_node = true;
    for child in handle.children.borrow().iter() {
        if let NodeData::Text { ref contents } = child.data {
            let mut content_ref = contents.borrow_mut();
            content_ref.clear();
            if first_text_node {
                content_ref.push_slice(new_text);
                first_text_node = false;
            }
        }
    }
}

/// 序列化DOM为HTML字符串
pub fn serialize_dom_to_html(dom: &RcDom) -> Result<String> {
    use html5ever::serialize::{serialize, SerializeOpts};
    use markup5ever_rcdom::SerializableHandle;
    use std::io::Cursor;

    let mut buffer = Vec::new();
    let cursor = Cursor::new(&mut buffer);

    serialize(
        cursor,
        &SerializableHandle::from(dom.document.clone()),
        SerializeOpts::default(),
    )
    .map_err(|e| anyhow::anyhow!("HTML序列化失败: {:?}", e))?;

    String::from_utf8(buffer).map_err(|e| anyhow::anyhow!("UTF-8转换失败: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<html><head>
        <link rel="stylesheet" href="https://cdn.example.com/a.css">
        <link rel="icon" href="favicon.ico">
        <style>body { color: red; }</style>
        <style>p { color: blue; }</style>
    </head><body>
        <img src="one.png"><img src="two.png"><img alt="no src">
        <script src="https://cdn.example.com/app.js"></script>
    </body></html>"#;

    #[test]
    fn test_collect_elements_by_tag_and_attr() {
        let dom = parse_html(SAMPLE).unwrap();

        let imgs = collect_elements(&dom, |name, _| name == "img");
        assert_eq!(imgs.len(), 3);

        let stylesheets = collect_elements(&dom, |name, attrs| {
            name == "link" && attribute_contains_token(attrs, "rel", "stylesheet")
        });
        assert_eq!(stylesheets.len(), 1);
    }

    #[test]
    fn test_get_and_set_attribute() {
        let dom = parse_html(SAMPLE).unwrap();
        let imgs = collect_elements(&dom, |name, _| name == "img");

        assert_eq!(get_attribute(&imgs[0], "src"), Some("one.png".to_string()));
        assert_eq!(get_attribute(&imgs[2], "src"), None);

        set_attribute(&imgs[0], "src", "images/one.png");
        assert_eq!(
            get_attribute(&imgs[0], "src"),
            Some("images/one.png".to_string())
        );

        // 属性不存在时不应新增
        set_attribute(&imgs[2], "src", "images/three.png");
        assert_eq!(get_attribute(&imgs[2], "src"), None);
    }

    #[test]
    fn test_attribute_contains_token_multi_value() {
        let dom = parse_html(
            r#"<html><head><link rel="PRELOAD stylesheet" href="a.css"></head></html>"#,
        )
        .unwrap();
        let links = collect_elements(&dom, |name, attrs| {
            name == "link" && attribute_contains_token(attrs, "rel", "stylesheet")
        });
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_find_first_element_document_order() {
        let dom = parse_html(SAMPLE).unwrap();
        let style = find_first_element(&dom, "style").unwrap();
        assert!(element_text(&style).contains("color: red"));

        assert!(find_first_element(&dom, "video").is_none());
    }

    #[test]
    fn test_set_element_text() {
        let dom = parse_html(SAMPLE).unwrap();
        let style = find_first_element(&dom, "style").unwrap();

        set_element_text(&style, "body { color: green; }");
        assert_eq!(element_text(&style), "body { color: green; }");
    }

    #[test]
    fn test_serialize_reflects_mutation() {
        let dom = parse_html(SAMPLE).unwrap();
        let imgs = collect_elements(&dom, |name, _| name == "img");
        set_attribute(&imgs[0], "src", "images/one.png");

        let html = serialize_dom_to_html(&dom).unwrap();
        assert!(html.contains(r#"src="images/one.png""#));
        assert!(html.contains(r#"src="two.png""#));
    }
}
